//! # Grading Report
//!
//! The human-readable report printed through the [`OutputChannel`], plus the
//! [`SessionSummary`] returned to callers once a run finishes.
//!
//! ## Layout
//!
//! ```text
//! ******************** BEGIN TESTING ********************
//!
//! --- Testing method sampleMethod ---
//! (naming / return type diagnostics)
//!
//! Student output:
//! [a, b, c]
//! Expected output:
//! [a, b, c]
//!
//! MATCHES EXPECTED RESULTS?: true
//!
//! -------------------------------
//! NUMBER OF TESTS PASSED: 1/1
//! -------------------------------
//!
//! ******************** DONE TESTING ********************
//! ```
//!
//! Every function here writes through [`OutputChannel::emit`], so none of them
//! can fail. Write errors surface once, at the end of the run.

use crate::invoke::InvocationError;
use crate::output::OutputChannel;
use crate::types::TypeDesc;
use serde::Serialize;

const RULE: &str = "-------------------------------";

pub fn begin_banner(out: &mut OutputChannel) {
    out.emit("******************** BEGIN TESTING ********************\n");
}

pub fn end_banner(out: &mut OutputChannel) {
    out.emit("\n\n******************** DONE TESTING ********************\n\n");
}

pub fn method_header(out: &mut OutputChannel, canonical: &str) {
    out.emit(format_args!("\n--- Testing method {canonical} ---"));
}

pub fn missing_method(out: &mut OutputChannel, name: &str) {
    out.emit(format_args!("No method with correct header called {name} exists."));
}

pub fn cannot_find(out: &mut OutputChannel) {
    out.emit(
        "Cannot find method. Check if student has an incorrect method header or put \
         it in the incorrect class.",
    );
}

pub fn naming_warning(out: &mut OutputChannel, required: &str, given: &str) {
    out.emit("Method has slightly incorrect name:");
    out.emit(format_args!("\tRequired name: {required}"));
    out.emit(format_args!("\tGiven name: {given}"));
}

/// Body of a return type mismatch, shared by advisory and blocking checks.
pub fn return_type_text(required: &TypeDesc, given: &TypeDesc) -> String {
    format!(
        "\nSTUDENT DOES NOT HAVE CORRECT RETURN TYPE. Manually review code and deduct points \
         for this issue as indicated in criteria.\n\tRequired return type: {required}\n\tGiven return type: {given}"
    )
}

pub fn return_type_blocked(out: &mut OutputChannel) {
    out.emit("Tests cannot be run on this method because of incorrect return type.");
}

/// The two renderings a verdict was reached on.
pub fn renderings(out: &mut OutputChannel, student: &str, expected: &str) {
    out.emit(format_args!("\nStudent output: \n{student}"));
    out.emit(format_args!("Expected output: \n{expected}"));
}

pub fn note(out: &mut OutputChannel, note: &str) {
    out.emit(note);
}

pub fn verdict(out: &mut OutputChannel, passed: bool) {
    out.emit(format_args!("\nMATCHES EXPECTED RESULTS?: {passed}\n\n"));
}

/// Text a submission printed before it failed.
pub fn partial_output(out: &mut OutputChannel, text: &str) {
    if !text.is_empty() {
        out.emit(format_args!("\nStudent output before failure: \n{text}"));
    }
}

pub fn exception(out: &mut OutputChannel, err: &InvocationError) {
    out.emit("\nAN EXCEPTION WAS THROWN. VIEW THE STACK TRACE BELOW:");
    out.emit(err.trace());
}

pub fn summary(out: &mut OutputChannel, summary: &SessionSummary) {
    out.emit(RULE);
    out.emit(format_args!(
        "NUMBER OF TESTS PASSED: {}/{}",
        summary.passed, summary.total
    ));
    out.emit(RULE);
}

/// Final tally of a grading run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub passed: usize,
    pub total: usize,
    /// RFC 3339 timestamps.
    pub started_at: String,
    pub finished_at: String,
}
