//! Marker Error Types
//!
//! [`MarkerError`] covers the failures that end a grading run. Everything that
//! goes wrong *inside* a test case (missing methods, wrong return types, a
//! submission that errors or panics) is reported and absorbed at the case
//! boundary instead, see [`crate::invoke::InvocationError`].

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkerError {
    /// The report sink rejected a write, so the run's output is incomplete.
    #[error("failed to write grading report: {0}")]
    Report(#[from] io::Error),
    /// The grading plan is malformed (e.g. a case with no tests).
    #[error("invalid grading plan: {0}")]
    Plan(String),
}
