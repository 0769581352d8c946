//! Screening Bot - Applicant screening over a chat conversation
//!
//! Applicants answer a fixed sequence of button questions; the bot decides
//! pass or fail from their answers and forwards the result to a workflow
//! webhook.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
