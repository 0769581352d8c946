//! Canonical answer values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::Step;

/// Canonical value behind a button, independent of its label or trigger code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Yes,
    No,
    FullTime,
    PartTime,
    Low,
    Now,
    Soon,
    Later,
    Good,
    Ok,
    Kids,
    Teens,
    Adults,
    All,
}

impl Choice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Yes => "yes",
            Choice::No => "no",
            Choice::FullTime => "full_time",
            Choice::PartTime => "part_time",
            Choice::Low => "low",
            Choice::Now => "now",
            Choice::Soon => "soon",
            Choice::Later => "later",
            Choice::Good => "good",
            Choice::Ok => "ok",
            Choice::Kids => "kids",
            Choice::Teens => "teens",
            Choice::Adults => "adults",
            Choice::All => "all",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded answer: a button choice or a typed number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(u32),
    Choice(Choice),
}

impl From<Choice> for AnswerValue {
    fn from(choice: Choice) -> Self {
        AnswerValue::Choice(choice)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Choice(choice) => write!(f, "{}", choice),
        }
    }
}

impl Step {
    /// Canonical choices a button step accepts; empty for free-text steps.
    pub fn allowed_choices(&self) -> &'static [Choice] {
        use Choice::*;
        match self {
            Step::TeamRole | Step::Setup | Step::SopAgreement => &[Yes, No],
            Step::WeeklyHours => &[FullTime, PartTime, Low],
            Step::StartDate => &[Now, Soon, Later],
            Step::EnglishLevel => &[Good, Ok, Low],
            Step::StudentTypes => &[Kids, Teens, Adults, All],
            Step::Age | Step::Completed => &[],
        }
    }

    /// Checks that a value has the right shape for this step.
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        match value {
            AnswerValue::Number(_) => self.is_free_text(),
            AnswerValue::Choice(choice) => self.allowed_choices().contains(choice),
        }
    }
}

/// Answers keyed by step, in the order they were given.
///
/// Entries are only ever appended; a key that is already present cannot
/// be overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(IndexMap<String, AnswerValue>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the answer for `step` after validating its shape.
    pub fn record(&mut self, step: Step, value: AnswerValue) -> Result<(), ValidationError> {
        let key = step.answer_key();
        if step.is_completed() {
            return Err(ValidationError::invalid_format(
                key,
                "a completed session takes no answers",
            ));
        }
        if !step.accepts(&value) {
            return Err(ValidationError::invalid_format(
                key,
                format!("'{}' is not a valid answer", value),
            ));
        }
        if self.0.contains_key(key) {
            return Err(ValidationError::invalid_format(key, "already answered"));
        }
        self.0.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, step: Step) -> Option<&AnswerValue> {
        self.0.get(step.answer_key())
    }

    pub fn contains(&self, step: Step) -> bool {
        self.0.contains_key(step.answer_key())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Answer keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_serializes_to_snake_case() {
        let json = serde_json::to_string(&Choice::FullTime).unwrap();
        assert_eq!(json, "\"full_time\"");
    }

    #[test]
    fn answer_values_serialize_untagged() {
        assert_eq!(
            serde_json::to_string(&AnswerValue::Choice(Choice::Yes)).unwrap(),
            "\"yes\""
        );
        assert_eq!(serde_json::to_string(&AnswerValue::Number(27)).unwrap(), "27");
    }

    #[test]
    fn answer_values_deserialize_by_shape() {
        let number: AnswerValue = serde_json::from_str("31").unwrap();
        let choice: AnswerValue = serde_json::from_str("\"part_time\"").unwrap();
        assert_eq!(number, AnswerValue::Number(31));
        assert_eq!(choice, AnswerValue::Choice(Choice::PartTime));
    }

    #[test]
    fn step_accepts_only_its_choices() {
        assert!(Step::TeamRole.accepts(&Choice::Yes.into()));
        assert!(!Step::TeamRole.accepts(&Choice::FullTime.into()));
        assert!(!Step::TeamRole.accepts(&AnswerValue::Number(3)));
        assert!(Step::Age.accepts(&AnswerValue::Number(25)));
        assert!(!Step::Age.accepts(&Choice::Yes.into()));
    }

    #[test]
    fn record_preserves_insertion_order() {
        let mut answers = Answers::new();
        answers.record(Step::TeamRole, Choice::Yes.into()).unwrap();
        answers.record(Step::WeeklyHours, Choice::FullTime.into()).unwrap();
        answers.record(Step::StartDate, Choice::Soon.into()).unwrap();

        let keys: Vec<&str> = answers.keys().collect();
        assert_eq!(keys, vec!["team_role", "weekly_hours", "start_date"]);

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(
            json,
            r#"{"team_role":"yes","weekly_hours":"full_time","start_date":"soon"}"#
        );
    }

    #[test]
    fn record_refuses_to_overwrite() {
        let mut answers = Answers::new();
        answers.record(Step::TeamRole, Choice::Yes.into()).unwrap();
        assert!(answers.record(Step::TeamRole, Choice::No.into()).is_err());
        assert_eq!(answers.get(Step::TeamRole), Some(&AnswerValue::Choice(Choice::Yes)));
    }

    #[test]
    fn record_refuses_invalid_shapes() {
        let mut answers = Answers::new();
        assert!(answers.record(Step::Setup, Choice::Kids.into()).is_err());
        assert!(answers.record(Step::Completed, Choice::Yes.into()).is_err());
        assert!(answers.is_empty());
    }
}
