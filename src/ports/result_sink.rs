//! Result sink port - handing finished screenings downstream.

use crate::domain::screening::ScreeningResult;

/// Port for delivering screening results.
///
/// Delivery is fire-and-forget: `dispatch` returns immediately, and
/// implementations log failures instead of reporting them. Nothing is
/// retried.
pub trait ResultSink: Send + Sync {
    fn dispatch(&self, result: ScreeningResult);
}
