//! Question catalog.
//!
//! The catalog is built once per variant and shared read-only by every
//! handler. Buttons carry short trigger codes (`"<prefix>:<code>"`); the
//! catalog is the only place that knows how a code maps back to a
//! canonical [`Choice`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{AnswerValue, Choice, Step};

/// Smallest age accepted as a plausible answer.
pub const AGE_MIN: u32 = 10;

/// Largest age accepted as a plausible answer.
pub const AGE_MAX: u32 = 80;

const TRIGGER_SEPARATOR: char = ':';

/// Which questionnaire a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Five yes/no style questions.
    #[default]
    Standard,
    /// Standard questions plus English level, age, and student types.
    Extended,
}

/// A rendered button: what the user sees and what comes back on press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub trigger: String,
}

/// Rows of buttons under a message.
pub type Keyboard = Vec<Vec<Button>>;

/// Text plus optional buttons, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Prompt {
    /// A plain message without buttons.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    /// Prepends a short notice line, keeping the buttons.
    pub fn with_notice(mut self, notice: &str) -> Self {
        self.text = format!("{}\n\n{}", notice, self.text);
        self
    }
}

/// One selectable option of a button question.
#[derive(Debug, Clone, Copy)]
pub struct ButtonSpec {
    label: &'static str,
    code: &'static str,
    choice: Choice,
}

/// How a question collects its answer.
#[derive(Debug, Clone)]
pub enum QuestionInput {
    Buttons(Vec<Vec<ButtonSpec>>),
    FreeText { min: u32, max: u32 },
}

/// Static definition of one question.
#[derive(Debug, Clone)]
pub struct Question {
    pub step: Step,
    pub text: &'static str,
    pub input: QuestionInput,
}

impl Question {
    fn buttons(step: Step, text: &'static str, rows: Vec<Vec<(&'static str, &'static str, Choice)>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(label, code, choice)| ButtonSpec { label, code, choice })
                    .collect()
            })
            .collect();
        Self {
            step,
            text,
            input: QuestionInput::Buttons(rows),
        }
    }

    /// Renders the question for display.
    pub fn render(&self) -> Prompt {
        let keyboard = match &self.input {
            QuestionInput::FreeText { .. } => None,
            QuestionInput::Buttons(rows) => {
                let prefix = self.step.trigger_prefix().unwrap_or_default();
                Some(
                    rows.iter()
                        .map(|row| {
                            row.iter()
                                .map(|spec| Button {
                                    label: spec.label.to_string(),
                                    trigger: format!("{}{}{}", prefix, TRIGGER_SEPARATOR, spec.code),
                                })
                                .collect()
                        })
                        .collect(),
                )
            }
        };
        Prompt {
            text: self.text.to_string(),
            keyboard,
        }
    }

    fn choice_for_code(&self, code: &str) -> Option<Choice> {
        match &self.input {
            QuestionInput::Buttons(rows) => rows
                .iter()
                .flatten()
                .find(|spec| spec.code == code)
                .map(|spec| spec.choice),
            QuestionInput::FreeText { .. } => None,
        }
    }
}

/// A trigger code resolved to its step and canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedTrigger {
    pub step: Step,
    pub value: AnswerValue,
}

/// Why a trigger code could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("trigger '{0}' has no step separator")]
    MissingSeparator(String),

    #[error("trigger '{0}' has an unknown step prefix")]
    UnknownPrefix(String),

    #[error("trigger '{0}' is not an option of its step")]
    UnknownCode(String),
}

/// Ordered, immutable list of questions for one variant.
pub struct QuestionCatalog {
    variant: Variant,
    questions: Vec<Question>,
}

static STANDARD: Lazy<QuestionCatalog> = Lazy::new(|| QuestionCatalog {
    variant: Variant::Standard,
    questions: base_questions(),
});

static EXTENDED: Lazy<QuestionCatalog> = Lazy::new(|| {
    let mut questions = base_questions();
    questions.extend(extended_questions());
    QuestionCatalog {
        variant: Variant::Extended,
        questions,
    }
});

impl QuestionCatalog {
    /// Returns the process-wide catalog for a variant.
    pub fn for_variant(variant: Variant) -> &'static QuestionCatalog {
        match variant {
            Variant::Standard => &STANDARD,
            Variant::Extended => &EXTENDED,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn step_count(&self) -> usize {
        self.questions.len()
    }

    /// Steps asked by this catalog, in order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.questions.iter().map(|q| q.step)
    }

    pub fn first_step(&self) -> Step {
        self.questions
            .first()
            .map(|q| q.step)
            .unwrap_or(Step::Completed)
    }

    /// The step following `step`, or `None` when `step` is the last one.
    pub fn next_after(&self, step: Step) -> Option<Step> {
        let index = self.index_of(step)?;
        self.questions.get(index + 1).map(|q| q.step)
    }

    pub fn index_of(&self, step: Step) -> Option<usize> {
        self.questions.iter().position(|q| q.step == step)
    }

    pub fn question(&self, step: Step) -> Option<&Question> {
        self.questions.iter().find(|q| q.step == step)
    }

    /// Renders the question at `index`.
    pub fn render(&self, index: usize) -> Option<Prompt> {
        self.questions.get(index).map(Question::render)
    }

    /// Renders the question for `step`.
    pub fn render_step(&self, step: Step) -> Option<Prompt> {
        self.question(step).map(Question::render)
    }

    /// Answer key of the question at `index`.
    pub fn key_for(&self, index: usize) -> Option<&'static str> {
        self.questions.get(index).map(|q| q.step.answer_key())
    }

    /// Declared bounds for a free-text step.
    pub fn free_text_bounds(&self, step: Step) -> Option<(u32, u32)> {
        match self.question(step)?.input {
            QuestionInput::FreeText { min, max } => Some((min, max)),
            QuestionInput::Buttons(_) => None,
        }
    }

    /// Decodes a trigger code into its step and canonical value.
    pub fn decode(&self, trigger: &str) -> Result<DecodedTrigger, TriggerError> {
        let (prefix, code) = trigger
            .split_once(TRIGGER_SEPARATOR)
            .ok_or_else(|| TriggerError::MissingSeparator(trigger.to_string()))?;

        let question = Step::from_trigger_prefix(prefix)
            .and_then(|step| self.question(step))
            .ok_or_else(|| TriggerError::UnknownPrefix(trigger.to_string()))?;

        let choice = question
            .choice_for_code(code)
            .ok_or_else(|| TriggerError::UnknownCode(trigger.to_string()))?;

        Ok(DecodedTrigger {
            step: question.step,
            value: AnswerValue::Choice(choice),
        })
    }
}

impl fmt::Debug for QuestionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionCatalog")
            .field("variant", &self.variant)
            .field("steps", &self.steps().collect::<Vec<_>>())
            .finish()
    }
}

fn base_questions() -> Vec<Question> {
    use Choice::*;
    vec![
        Question::buttons(
            Step::TeamRole,
            "Are you comfortable working as part of a team, following a shared schedule and reporting to a lead?",
            vec![vec![("Yes", "y", Yes), ("No", "n", No)]],
        ),
        Question::buttons(
            Step::WeeklyHours,
            "How many hours per week can you commit?",
            vec![
                vec![("Full time (30+ hours)", "ft", FullTime)],
                vec![("Part time (about 20 hours)", "pt", PartTime)],
                vec![("Less than 15 hours", "lo", Low)],
            ],
        ),
        Question::buttons(
            Step::StartDate,
            "When could you start?",
            vec![vec![
                ("Right away", "n", Now),
                ("Within 2 weeks", "s", Soon),
                ("Later", "l", Later),
            ]],
        ),
        Question::buttons(
            Step::Setup,
            "Do you have a stable internet connection and a quiet place to work?",
            vec![vec![("Yes", "y", Yes), ("No", "n", No)]],
        ),
        Question::buttons(
            Step::SopAgreement,
            "Do you agree to follow our standard operating procedures (SOP)?",
            vec![vec![("I agree", "y", Yes), ("I don't agree", "n", No)]],
        ),
    ]
}

fn extended_questions() -> Vec<Question> {
    use Choice::*;
    vec![
        Question::buttons(
            Step::EnglishLevel,
            "How would you rate your spoken English?",
            vec![vec![
                ("Fluent", "g", Good),
                ("Conversational", "o", Ok),
                ("Basic", "l", Low),
            ]],
        ),
        Question {
            step: Step::Age,
            text: "How old are you? Please type your age as a number.",
            input: QuestionInput::FreeText {
                min: AGE_MIN,
                max: AGE_MAX,
            },
        },
        Question::buttons(
            Step::StudentTypes,
            "Which students have you taught?",
            vec![
                vec![("Kids", "k", Kids), ("Teens", "t", Teens)],
                vec![("Adults", "a", Adults), ("All of them", "x", All)],
            ],
        ),
    ]
}
