//! Screening domain - the applicant questionnaire and its rules.
//!
//! # Module Organization
//!
//! - `step` - Ordered question positions and the terminal `Completed` marker
//! - `answer` - Canonical answer values and the insertion-ordered answer map
//! - `catalog` - Static question definitions, rendering data, trigger codes
//! - `policy` - Fail predicates and configurable thresholds
//! - `session` - The per-chat session aggregate
//! - `verdict` - Pass/fail outcome and the finished result record
//! - `engine` - Pure transition function driving a session forward

mod answer;
mod catalog;
pub mod engine;
mod policy;
mod session;
mod step;
mod verdict;

pub use answer::{AnswerValue, Answers, Choice};
pub use catalog::{
    Button, DecodedTrigger, Keyboard, Prompt, Question, QuestionCatalog, QuestionInput,
    TriggerError, Variant, AGE_MAX, AGE_MIN,
};
pub use engine::{IgnoreReason, RepromptReason, Transition};
pub use policy::{weekly_hours_for, ScreeningPolicy, DEFAULT_MIN_WEEKLY_HOURS};
pub use session::ScreeningSession;
pub use step::Step;
pub use verdict::{Outcome, ScreeningResult, Verdict};
