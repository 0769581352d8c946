//! Thresholds resolved from the environment on every transition.
//!
//! Reads `<PREFIX>__SCREENING__MIN_WEEKLY_HOURS` and
//! `<PREFIX>__SCREENING__MAX_AGE`. A variable that is unset keeps the
//! startup value; an unreadable one is logged and ignored.

use serde::Deserialize;

use crate::config::ENV_PREFIX;
use crate::domain::screening::ScreeningPolicy;
use crate::ports::PolicySource;

#[derive(Debug, Default, Deserialize)]
struct Overrides {
    #[serde(default)]
    screening: ScreeningOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct ScreeningOverrides {
    min_weekly_hours: Option<u32>,
    max_age: Option<u32>,
}

/// Policy source backed by environment variables.
#[derive(Debug, Clone)]
pub struct EnvPolicySource {
    prefix: String,
    fallback: ScreeningPolicy,
}

impl EnvPolicySource {
    /// Reads variables under the application prefix.
    pub fn new(fallback: ScreeningPolicy) -> Self {
        Self::with_prefix(ENV_PREFIX, fallback)
    }

    pub fn with_prefix(prefix: impl Into<String>, fallback: ScreeningPolicy) -> Self {
        Self {
            prefix: prefix.into(),
            fallback,
        }
    }

    fn read(&self) -> Result<Overrides, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(&self.prefix)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

impl PolicySource for EnvPolicySource {
    fn current(&self) -> ScreeningPolicy {
        match self.read() {
            Ok(overrides) => ScreeningPolicy {
                min_weekly_hours: overrides
                    .screening
                    .min_weekly_hours
                    .unwrap_or(self.fallback.min_weekly_hours),
                max_age: overrides.screening.max_age.or(self.fallback.max_age),
            },
            Err(e) => {
                tracing::warn!("Unreadable screening thresholds, using startup values: {}", e);
                self.fallback
            }
        }
    }
}
