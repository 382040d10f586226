use crate::types::Value;

/// How a pair of returned values is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Value equality on the expected value's terms.
    Scalar,
    /// Equality of the rendered `[e1, e2, ...]` listings.
    Array,
}

/// A comparator's judgement plus the renderings it was based on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub matches: bool,
    pub student: String,
    pub expected: String,
    /// Extra explanation for the report, if any.
    pub note: Option<String>,
}

/// ResultComparator is a strategy trait for judging a student's result against
/// the reference result. Implementations are pure: reporting and tallying are
/// done by [`crate::comparators`].
pub trait ResultComparator {
    /// Compare two captured blobs of printed text.
    fn text_matches(&self, student: &str, expected: &str) -> bool;

    /// Compare two returned values.
    fn values_match(&self, student: &Value, expected: &Value, shape: Shape) -> Verdict;
}
