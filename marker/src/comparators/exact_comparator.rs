//! A comparator that demands exact agreement with the reference result.
//!
//! Printed text must match byte for byte. Scalars are compared with the
//! expected value's equality, arrays by their rendered listings.

use crate::traits::comparator::{ResultComparator, Shape, Verdict};
use crate::types::Value;

pub const NULL_EXPECTED_NOTE: &str = "Expected result is null but student result is not.";

/// The default comparator.
///
/// Null handling is deliberately one-sided: a null expected value only accepts
/// a null student value, while a non-null expected value decides equality on
/// its own terms.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactComparator;

impl ResultComparator for ExactComparator {
    fn text_matches(&self, student: &str, expected: &str) -> bool {
        expected == student
    }

    fn values_match(&self, student: &Value, expected: &Value, shape: Shape) -> Verdict {
        let student_text = student.to_string();
        let expected_text = expected.to_string();

        let (matches, note) = match shape {
            // Two different values that render identically count as equal.
            Shape::Array => (expected_text == student_text, None),
            Shape::Scalar if !expected.is_null() => (expected == student, None),
            Shape::Scalar if student.is_null() => (true, None),
            Shape::Scalar => (false, Some(NULL_EXPECTED_NOTE.to_string())),
        };

        Verdict {
            matches,
            student: student_text,
            expected: expected_text,
            note,
        }
    }
}
