//! Fail predicates for each screening step.

use serde::{Deserialize, Serialize};

use super::{AnswerValue, Choice, Step};

/// Minimum weekly hours when nothing is configured.
pub const DEFAULT_MIN_WEEKLY_HOURS: u32 = 15;

/// Approximate weekly hours behind each availability choice.
pub fn weekly_hours_for(choice: Choice) -> Option<u32> {
    match choice {
        Choice::FullTime => Some(30),
        Choice::PartTime => Some(20),
        Choice::Low => Some(0),
        _ => None,
    }
}

/// Thresholds the fail predicates are evaluated against.
///
/// Resolved from configuration for every transition, never cached
/// across events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningPolicy {
    /// Applicants offering fewer hours than this fail.
    pub min_weekly_hours: u32,
    /// Applicants at or above this age fail; `None` disables the age gate.
    pub max_age: Option<u32>,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            min_weekly_hours: DEFAULT_MIN_WEEKLY_HOURS,
            max_age: None,
        }
    }
}

impl ScreeningPolicy {
    /// Returns the fail reason if `value` disqualifies the applicant at `step`.
    pub fn evaluate(&self, step: Step, value: &AnswerValue) -> Option<String> {
        match (step, value) {
            (Step::TeamRole, AnswerValue::Choice(Choice::No)) => {
                Some("team_role: applicant does not want to work as part of a team".to_string())
            }
            (Step::WeeklyHours, AnswerValue::Choice(choice)) => {
                let hours = weekly_hours_for(*choice)?;
                (hours < self.min_weekly_hours).then(|| {
                    format!(
                        "weekly_hours: about {}h per week offered, at least {}h required",
                        hours, self.min_weekly_hours
                    )
                })
            }
            (Step::Setup, AnswerValue::Choice(Choice::No)) => {
                Some("setup: no stable internet connection or quiet workspace".to_string())
            }
            (Step::SopAgreement, AnswerValue::Choice(Choice::No)) => {
                Some("sop_agreement: did not agree to follow the standard procedures".to_string())
            }
            (Step::EnglishLevel, AnswerValue::Choice(Choice::Low)) => {
                Some("english_level: spoken English below the required level".to_string())
            }
            (Step::Age, AnswerValue::Number(age)) => {
                let max_age = self.max_age?;
                (*age >= max_age)
                    .then(|| format!("age: {} is at or above the limit of {}", age, max_age))
            }
            _ => None,
        }
    }
}
