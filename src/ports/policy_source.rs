//! Policy source port - where screening thresholds come from.

use crate::domain::screening::ScreeningPolicy;

/// Resolves the thresholds in effect right now.
///
/// Called once per transition; implementations must not cache across
/// events so a configuration change applies to the next answer.
pub trait PolicySource: Send + Sync {
    fn current(&self) -> ScreeningPolicy;
}
