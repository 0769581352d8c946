//! Screening verdicts and the result record handed downstream.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ApplicantToken, ChatId, SessionId, Timestamp};

use super::{Answers, ScreeningSession};

/// Wire form of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

/// Final screening decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Failed, with a reason naming the step that disqualified the applicant.
    Fail(String),
}

impl Verdict {
    pub fn outcome(&self) -> Outcome {
        match self {
            Verdict::Pass => Outcome::Pass,
            Verdict::Fail(_) => Outcome::Fail,
        }
    }

    /// Fail reason; empty on pass.
    pub fn reason(&self) -> &str {
        match self {
            Verdict::Pass => "",
            Verdict::Fail(reason) => reason,
        }
    }
}

/// Immutable record of a finished screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub session_id: SessionId,
    pub token: ApplicantToken,
    pub chat_id: ChatId,
    pub display_name: Option<String>,
    pub result: Outcome,
    pub reason: String,
    pub answers: Answers,
    pub started_at: Timestamp,
    pub completed_at: Timestamp,
}

impl ScreeningResult {
    /// Snapshots a session and its verdict.
    pub fn from_session(session: &ScreeningSession, verdict: &Verdict) -> Self {
        Self {
            session_id: *session.session_id(),
            token: session.token().clone(),
            chat_id: session.chat_id(),
            display_name: session.display_name().map(str::to_string),
            result: verdict.outcome(),
            reason: verdict.reason().to_string(),
            answers: session.answers().clone(),
            started_at: *session.started_at(),
            completed_at: Timestamp::now(),
        }
    }
}
