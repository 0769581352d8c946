//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `screening` - Questionnaire, session aggregate, verdicts, transitions

pub mod foundation;
pub mod screening;
