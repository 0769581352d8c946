//! Screening configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::screening::{ScreeningPolicy, Variant, AGE_MAX, AGE_MIN, DEFAULT_MIN_WEEKLY_HOURS};
use crate::ports::DEFAULT_SESSION_TTL_SECS;

use super::error::ValidationError;

/// Questionnaire selection and thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    /// Which question catalog to run
    #[serde(default)]
    pub variant: Variant,

    /// Minimum weekly hours an applicant must offer
    #[serde(default = "default_min_weekly_hours")]
    pub min_weekly_hours: u32,

    /// Age at or above which the extended screening fails
    #[serde(default)]
    pub max_age: Option<u32>,

    /// Lifetime of an idle session
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

impl ScreeningConfig {
    /// Thresholds as configured at startup
    pub fn policy(&self) -> ScreeningPolicy {
        ScreeningPolicy {
            min_weekly_hours: self.min_weekly_hours,
            max_age: self.max_age,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Validate screening configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if let Some(max_age) = self.max_age {
            if !(AGE_MIN..=AGE_MAX).contains(&max_age) {
                return Err(ValidationError::InvalidMaxAge(max_age));
            }
        }
        Ok(())
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            min_weekly_hours: default_min_weekly_hours(),
            max_age: None,
            session_ttl_secs: default_session_ttl(),
        }
    }
}

fn default_min_weekly_hours() -> u32 {
    DEFAULT_MIN_WEEKLY_HOURS
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}
