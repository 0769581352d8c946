//! Pure screening transitions.
//!
//! These functions decide what an input does to a session. They mutate
//! the session in memory only; persistence, rendering, and reporting are
//! the caller's job.

use super::{
    AnswerValue, DecodedTrigger, QuestionCatalog, ScreeningPolicy, ScreeningSession, Step,
    Verdict,
};

/// What an accepted or rejected input did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Answer recorded; the session now waits on this step.
    Advanced(Step),
    /// Answer recorded and a verdict reached.
    Finished(Verdict),
    /// Input unusable for the current step; ask again, nothing changed.
    Reprompt(RepromptReason),
    /// Input dropped without touching the session.
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepromptReason {
    NotANumber,
    OutOfRange { min: u32, max: u32 },
    ButtonsExpected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session already has a verdict.
    Completed,
    /// The button belongs to a question other than the current one.
    StaleStep { current: Step, received: Step },
    /// The answer did not fit the step it was decoded for.
    Rejected,
}

/// Applies a decoded button press.
pub fn apply_choice(
    session: &mut ScreeningSession,
    trigger: DecodedTrigger,
    catalog: &QuestionCatalog,
    policy: &ScreeningPolicy,
) -> Transition {
    if session.is_completed() {
        return Transition::Ignored(IgnoreReason::Completed);
    }
    if trigger.step != session.step() {
        return Transition::Ignored(IgnoreReason::StaleStep {
            current: session.step(),
            received: trigger.step,
        });
    }
    record_and_evaluate(session, trigger.step, trigger.value, catalog, policy)
}

/// Applies typed text to the current step.
pub fn apply_text(
    session: &mut ScreeningSession,
    raw: &str,
    catalog: &QuestionCatalog,
    policy: &ScreeningPolicy,
) -> Transition {
    if session.is_completed() {
        return Transition::Ignored(IgnoreReason::Completed);
    }
    let step = session.step();
    let Some((min, max)) = catalog.free_text_bounds(step) else {
        return Transition::Reprompt(RepromptReason::ButtonsExpected);
    };

    let Ok(number) = raw.trim().parse::<u32>() else {
        return Transition::Reprompt(RepromptReason::NotANumber);
    };
    if !(min..=max).contains(&number) {
        return Transition::Reprompt(RepromptReason::OutOfRange { min, max });
    }

    record_and_evaluate(session, step, AnswerValue::Number(number), catalog, policy)
}

fn record_and_evaluate(
    session: &mut ScreeningSession,
    step: Step,
    value: AnswerValue,
    catalog: &QuestionCatalog,
    policy: &ScreeningPolicy,
) -> Transition {
    if session.record_answer(step, value).is_err() {
        return Transition::Ignored(IgnoreReason::Rejected);
    }

    if let Some(reason) = policy.evaluate(step, &value) {
        return Transition::Finished(Verdict::Fail(reason));
    }

    match catalog.next_after(step) {
        None => Transition::Finished(Verdict::Pass),
        Some(next) => match session.advance_to(next) {
            Ok(()) => Transition::Advanced(next),
            Err(_) => Transition::Ignored(IgnoreReason::Rejected),
        },
    }
}
