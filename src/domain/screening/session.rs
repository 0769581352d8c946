//! Screening session aggregate.
//!
//! One session exists per chat. Starting again replaces the previous
//! session outright; there is no history.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ApplicantToken, ChatId, SessionId, StateMachine, Timestamp, ValidationError,
};

use super::{AnswerValue, Answers, Step};

/// Session aggregate - progress of one applicant through the questionnaire.
///
/// # Invariants
///
/// - `token` is set at creation and never changes
/// - `step` only moves forward, and never leaves `Completed`
/// - `answers` only holds keys of steps already reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSession {
    session_id: SessionId,
    chat_id: ChatId,
    token: ApplicantToken,
    step: Step,
    answers: Answers,
    started_at: Timestamp,
    display_name: Option<String>,
}

impl ScreeningSession {
    /// Starts a new session positioned at `first_step`.
    pub fn start(
        chat_id: ChatId,
        token: ApplicantToken,
        display_name: Option<String>,
        first_step: Step,
    ) -> Self {
        Self {
            session_id: SessionId::new(),
            chat_id,
            token,
            step: first_step,
            answers: Answers::new(),
            started_at: Timestamp::now(),
            display_name: display_name.filter(|name| !name.trim().is_empty()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn token(&self) -> &ApplicantToken {
        &self.token
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.step.is_completed()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records the answer for the current step.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if `step` is not the current step, the session is
    ///   completed, the value does not fit the step, or it was already answered
    pub fn record_answer(&mut self, step: Step, value: AnswerValue) -> Result<(), ValidationError> {
        if step != self.step {
            return Err(ValidationError::invalid_format(
                step.answer_key(),
                format!("session is at '{}'", self.step),
            ));
        }
        self.answers.record(step, value)
    }

    /// Moves to a later step.
    pub fn advance_to(&mut self, next: Step) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(next)?;
        Ok(())
    }

    /// Marks the session completed. Completing twice is a no-op.
    pub fn complete(&mut self) {
        self.step = Step::Completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::screening::Choice;

    fn test_session() -> ScreeningSession {
        ScreeningSession::start(
            ChatId::new(1001),
            ApplicantToken::new("token-123").unwrap(),
            Some("@applicant".to_string()),
            Step::TeamRole,
        )
    }

    #[test]
    fn start_positions_at_first_step_with_no_answers() {
        let session = test_session();
        assert_eq!(session.step(), Step::TeamRole);
        assert!(session.answers().is_empty());
        assert_eq!(session.display_name(), Some("@applicant"));
        assert_eq!(session.token().as_str(), "token-123");
    }

    #[test]
    fn blank_display_name_is_dropped() {
        let session = ScreeningSession::start(
            ChatId::new(1),
            ApplicantToken::new("token-123").unwrap(),
            Some("  ".to_string()),
            Step::TeamRole,
        );
        assert_eq!(session.display_name(), None);
    }

    #[test]
    fn restarts_get_distinct_session_ids() {
        assert_ne!(test_session().session_id(), test_session().session_id());
    }

    #[test]
    fn record_answer_accepts_current_step() {
        let mut session = test_session();
        session
            .record_answer(Step::TeamRole, Choice::Yes.into())
            .unwrap();
        assert!(session.answers().contains(Step::TeamRole));
    }

    #[test]
    fn record_answer_rejects_other_steps() {
        let mut session = test_session();
        let result = session.record_answer(Step::WeeklyHours, Choice::FullTime.into());
        assert!(result.is_err());
        assert!(session.answers().is_empty());
    }

    #[test]
    fn advance_only_moves_forward() {
        let mut session = test_session();
        session.advance_to(Step::WeeklyHours).unwrap();
        assert!(session.advance_to(Step::TeamRole).is_err());
        assert_eq!(session.step(), Step::WeeklyHours);
    }

    #[test]
    fn completed_session_rejects_everything() {
        let mut session = test_session();
        session.complete();
        assert!(session.is_completed());
        assert!(session.advance_to(Step::WeeklyHours).is_err());
        assert!(session
            .record_answer(Step::Completed, Choice::Yes.into())
            .is_err());
    }

    #[test]
    fn serialization_roundtrips_through_json() {
        let mut session = test_session();
        session
            .record_answer(Step::TeamRole, Choice::Yes.into())
            .unwrap();
        session.advance_to(Step::WeeklyHours).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: ScreeningSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert!(json.contains("\"step\":\"weekly_hours\""));
    }
}
