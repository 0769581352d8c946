//! Screening steps.
//!
//! Every question the bot can ask has a fixed position in one global
//! ordering. Catalog variants pick an ordered subset of these positions,
//! so progression is always forward in this ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Position of a session in the question sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Willing to work as part of a team.
    TeamRole,
    /// Hours per week the applicant can commit.
    WeeklyHours,
    /// How soon the applicant can start.
    StartDate,
    /// Stable internet and a quiet workspace.
    Setup,
    /// Agreement to follow standard operating procedures.
    SopAgreement,
    /// Spoken English level (extended variant).
    EnglishLevel,
    /// Age, typed as free text (extended variant).
    Age,
    /// Student groups the applicant has taught (extended variant).
    StudentTypes,
    /// Terminal marker; the verdict has been reached.
    Completed,
}

impl Step {
    /// Every question step in global order, excluding `Completed`.
    pub const QUESTIONS: [Step; 8] = [
        Step::TeamRole,
        Step::WeeklyHours,
        Step::StartDate,
        Step::Setup,
        Step::SopAgreement,
        Step::EnglishLevel,
        Step::Age,
        Step::StudentTypes,
    ];

    /// Key under which the answer to this step is recorded.
    pub fn answer_key(&self) -> &'static str {
        match self {
            Step::TeamRole => "team_role",
            Step::WeeklyHours => "weekly_hours",
            Step::StartDate => "start_date",
            Step::Setup => "setup",
            Step::SopAgreement => "sop_agreement",
            Step::EnglishLevel => "english_level",
            Step::Age => "age",
            Step::StudentTypes => "student_types",
            Step::Completed => "completed",
        }
    }

    /// Prefix carried by trigger codes of this step's buttons.
    pub fn trigger_prefix(&self) -> Option<&'static str> {
        match self {
            Step::TeamRole => Some("tr"),
            Step::WeeklyHours => Some("wh"),
            Step::StartDate => Some("sd"),
            Step::Setup => Some("su"),
            Step::SopAgreement => Some("sop"),
            Step::EnglishLevel => Some("en"),
            Step::StudentTypes => Some("st"),
            Step::Age | Step::Completed => None,
        }
    }

    /// Resolves a trigger prefix back to its step.
    pub fn from_trigger_prefix(prefix: &str) -> Option<Step> {
        Step::QUESTIONS
            .into_iter()
            .find(|step| step.trigger_prefix() == Some(prefix))
    }

    /// True when this step expects typed input instead of a button press.
    pub fn is_free_text(&self) -> bool {
        matches!(self, Step::Age)
    }

    /// Returns true once the verdict has been reached.
    pub fn is_completed(&self) -> bool {
        matches!(self, Step::Completed)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.answer_key())
    }
}

impl StateMachine for Step {
    fn can_transition_to(&self, target: &Self) -> bool {
        !self.is_completed() && target > self
    }

    fn valid_transitions(&self) -> Vec<Self> {
        if self.is_completed() {
            return vec![];
        }
        Step::QUESTIONS
            .into_iter()
            .filter(|step| step > self)
            .chain(std::iter::once(Step::Completed))
            .collect()
    }
}
