//! Fixed thresholds.

use crate::domain::screening::ScreeningPolicy;
use crate::ports::PolicySource;

/// Serves the same policy for every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPolicySource {
    policy: ScreeningPolicy,
}

impl StaticPolicySource {
    pub fn new(policy: ScreeningPolicy) -> Self {
        Self { policy }
    }
}

impl PolicySource for StaticPolicySource {
    fn current(&self) -> ScreeningPolicy {
        self.policy
    }
}
