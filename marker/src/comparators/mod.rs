//! # Comparators
//!
//! Judging, reporting and tallying one test.
//!
//! [`compare_text`] and [`compare_values`] ask a
//! [`ResultComparator`](crate::traits::comparator::ResultComparator) for a
//! verdict, print both renderings and the verdict, and count a pass on the
//! session tally.
//!
//! The available comparators are:
//! - [`exact_comparator`]: exact text, value or listing equality.

pub mod exact_comparator;

use crate::output::OutputChannel;
use crate::report;
use crate::session::Tally;
use crate::traits::comparator::{ResultComparator, Shape};
use crate::types::{TestOutcome, Value};

/// Judges two captured blobs of printed text.
pub fn compare_text(
    out: &mut OutputChannel,
    tally: &mut Tally,
    comparator: &dyn ResultComparator,
    student: &str,
    expected: &str,
) -> TestOutcome {
    let passed = comparator.text_matches(student, expected);
    report::renderings(out, student, expected);
    report::verdict(out, passed);
    tally.record(passed);

    TestOutcome {
        passed,
        student: student.to_string(),
        expected: expected.to_string(),
    }
}

/// Judges two returned values, as listings when `is_array` is set.
pub fn compare_values(
    out: &mut OutputChannel,
    tally: &mut Tally,
    comparator: &dyn ResultComparator,
    student: &Value,
    expected: &Value,
    is_array: bool,
) -> TestOutcome {
    let shape = if is_array { Shape::Array } else { Shape::Scalar };
    let verdict = comparator.values_match(student, expected, shape);

    report::renderings(out, &verdict.student, &verdict.expected);
    if let Some(note) = &verdict.note {
        report::note(out, note);
    }
    report::verdict(out, verdict.matches);
    tally.record(verdict.matches);

    TestOutcome {
        passed: verdict.matches,
        student: verdict.student,
        expected: verdict.expected,
    }
}
