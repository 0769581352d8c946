//! Fixed texts sent outside the question flow.

use crate::domain::screening::{Prompt, RepromptReason, Verdict};

pub const START_INSTRUCTIONS: &str = "Hi! To begin your screening, please open the personal link \
you received from our recruiting team. It starts the conversation with your applicant code.";

pub const WELCOME: &str = "Welcome! A few quick questions will help us understand whether this role \
fits you. Answer with the buttons below each question.";

const PASS_MESSAGE: &str = "Thank you! Your answers have been recorded and a recruiter will \
contact you soon about the next steps.";

const FAIL_MESSAGE: &str = "Thank you for your time. Based on your answers this position is not \
the right fit at the moment. We wish you the best of luck.";

pub const RETRY_NOTICE: &str = "Something went wrong on our side, please answer again.";

const BUTTONS_HINT: &str = "Please use the buttons below to answer.";

const NOT_A_NUMBER_HINT: &str = "Please reply with a number.";

/// Closing message for a verdict.
pub fn closing(verdict: &Verdict) -> Prompt {
    match verdict {
        Verdict::Pass => Prompt::text(PASS_MESSAGE),
        Verdict::Fail(_) => Prompt::text(FAIL_MESSAGE),
    }
}

/// Hint prepended to a re-sent question.
pub fn reprompt_hint(reason: RepromptReason) -> String {
    match reason {
        RepromptReason::ButtonsExpected => BUTTONS_HINT.to_string(),
        RepromptReason::NotANumber => NOT_A_NUMBER_HINT.to_string(),
        RepromptReason::OutOfRange { min, max } => {
            format!("Please reply with a number between {} and {}.", min, max)
        }
    }
}
