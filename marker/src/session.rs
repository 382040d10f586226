//! Grading sessions.
//!
//! A [`TestPlan`] collects test cases. [`TestPlan::run`] consumes it and drives
//! a [`TestSession`] through every case exactly once, then prints the tally.
//! There is no way back from a running session to a plan.
//!
//! Each case resolves the submitted and the reference callable, invokes both
//! with the same arguments and hands the results to the comparator. Anything
//! that goes wrong inside a case is reported and counted as a failure; the
//! remaining cases still run.

use crate::callable::Callable;
use crate::comparators::{self, exact_comparator::ExactComparator};
use crate::error::MarkerError;
use crate::invoke::InvocationError;
use crate::output::OutputChannel;
use crate::report::{self, SessionSummary};
use crate::resolver::MethodResolver;
use crate::traits::comparator::ResultComparator;
use crate::traits::introspect::CallableSource;
use crate::types::{TestOutcome, TypeDesc, Value};
use chrono::Utc;
use std::mem;

/// Running pass count against a total fixed when the session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    passed: usize,
    total: usize,
}

impl Tally {
    pub fn new(total: usize) -> Self {
        Self { passed: 0, total }
    }

    pub fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        }
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// Name and signature a submitted method is required to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub canonical: String,
    pub returns: TypeDesc,
    pub params: Vec<TypeDesc>,
    /// Misspellings that are still accepted, tried in order.
    pub alternates: Vec<String>,
}

impl MethodSpec {
    pub fn new(canonical: impl Into<String>, returns: TypeDesc) -> Self {
        Self {
            canonical: canonical.into(),
            returns,
            params: Vec::new(),
            alternates: Vec::new(),
        }
    }

    pub fn params(mut self, params: impl IntoIterator<Item = TypeDesc>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    pub fn alternates<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternates = names.into_iter().map(Into::into).collect();
        self
    }
}

/// What a test compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// Printed text.
    Output,
    /// Returned scalar value.
    Value,
    /// Returned array, compared by its rendered listing.
    Array,
}

/// One method under test and the argument lists it is called with. Every
/// argument list is one test.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub method: MethodSpec,
    pub mode: CompareMode,
    pub inputs: Vec<Vec<Value>>,
}

impl TestCase {
    pub fn new(method: MethodSpec, mode: CompareMode) -> Self {
        Self {
            method,
            mode,
            inputs: Vec::new(),
        }
    }

    pub fn input(mut self, args: Vec<Value>) -> Self {
        self.inputs.push(args);
        self
    }
}

/// A grading run that is still collecting test cases.
pub struct TestPlan<'a> {
    submission: &'a dyn CallableSource,
    solution: &'a dyn CallableSource,
    cases: Vec<TestCase>,
    comparator: Box<dyn ResultComparator + 'a>,
}

impl<'a> TestPlan<'a> {
    pub fn new(submission: &'a dyn CallableSource, solution: &'a dyn CallableSource) -> Self {
        Self {
            submission,
            solution,
            cases: Vec::new(),
            comparator: Box::new(ExactComparator),
        }
    }

    pub fn case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Replaces the default [`ExactComparator`].
    pub fn with_comparator<C: ResultComparator + 'a>(mut self, comparator: C) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    /// Number of tests declared so far.
    pub fn total(&self) -> usize {
        self.cases.iter().map(|case| case.inputs.len()).sum()
    }

    /// Runs every case, printing the report to `out`.
    ///
    /// Fails only if the plan is malformed or the report could not be written.
    pub fn run(self, out: &mut OutputChannel) -> Result<SessionSummary, MarkerError> {
        self.validate()?;
        let total = self.total();

        let session = TestSession {
            submission: self.submission,
            solution: self.solution,
            cases: self.cases,
            comparator: self.comparator,
            tally: Tally::new(total),
        };
        session.run(out)
    }

    fn validate(&self) -> Result<(), MarkerError> {
        for case in &self.cases {
            let spec = &case.method;
            if let Some(position) = spec.params.iter().position(contains_void) {
                return Err(MarkerError::Plan(format!(
                    "parameter {} of {} is declared void",
                    position + 1,
                    spec.canonical
                )));
            }
        }
        Ok(())
    }
}

fn contains_void(ty: &TypeDesc) -> bool {
    match ty {
        TypeDesc::Void => true,
        TypeDesc::Array(elem) => contains_void(elem),
        _ => false,
    }
}

/// A grading run in progress. Ends by printing the tally.
pub struct TestSession<'a> {
    submission: &'a dyn CallableSource,
    solution: &'a dyn CallableSource,
    cases: Vec<TestCase>,
    comparator: Box<dyn ResultComparator + 'a>,
    tally: Tally,
}

impl TestSession<'_> {
    fn run(mut self, out: &mut OutputChannel) -> Result<SessionSummary, MarkerError> {
        let started_at = Utc::now().to_rfc3339();
        tracing::info!(
            submission = self.submission.name(),
            solution = self.solution.name(),
            cases = self.cases.len(),
            total = self.tally.total(),
            "grading session started"
        );

        report::begin_banner(out);
        for case in mem::take(&mut self.cases) {
            self.run_case(out, &case);
        }

        let summary = SessionSummary {
            passed: self.tally.passed(),
            total: self.tally.total(),
            started_at,
            finished_at: Utc::now().to_rfc3339(),
        };
        report::summary(out, &summary);
        report::end_banner(out);

        match serde_json::to_string(&summary) {
            Ok(json) => tracing::info!(summary = %json, "grading session finished"),
            Err(err) => tracing::warn!("could not serialise session summary: {err}"),
        }

        if let Some(err) = out.take_error() {
            return Err(MarkerError::Report(err));
        }
        Ok(summary)
    }

    fn run_case(&mut self, out: &mut OutputChannel, case: &TestCase) {
        let spec = &case.method;
        report::method_header(out, &spec.canonical);

        let student = MethodResolver::new(self.submission).get_validated_callable(
            out,
            &spec.canonical,
            &spec.returns,
            &spec.alternates,
            &spec.params,
        );
        let reference = MethodResolver::new(self.solution)
            .resolve(out, &spec.canonical, &[], &spec.params)
            .into_candidate();

        let (Some(student), Some(reference)) = (student, reference) else {
            tracing::warn!(
                method = %spec.canonical,
                skipped = case.inputs.len(),
                "skipping tests for unresolved method"
            );
            return;
        };

        for (index, args) in case.inputs.iter().enumerate() {
            match self.run_test(out, case.mode, &student, &reference, args) {
                Ok(outcome) => tracing::debug!(
                    method = %spec.canonical,
                    test = index + 1,
                    passed = outcome.passed,
                    "test finished"
                ),
                Err(err) => {
                    report::exception(out, &err);
                    tracing::error!(
                        method = %spec.canonical,
                        test = index + 1,
                        "invocation failed: {}",
                        err.trace()
                    );
                }
            }
        }
    }

    fn run_test(
        &mut self,
        out: &mut OutputChannel,
        mode: CompareMode,
        student: &Callable,
        reference: &Callable,
        args: &[Value],
    ) -> Result<TestOutcome, InvocationError> {
        match mode {
            CompareMode::Output => {
                let student_run = out.capture_during_call(student, args);
                if let Err(err) = student_run.outcome {
                    report::partial_output(out, &student_run.text);
                    return Err(err);
                }
                let expected_run = out.capture_during_call(reference, args);
                expected_run.outcome?;

                Ok(comparators::compare_text(
                    out,
                    &mut self.tally,
                    self.comparator.as_ref(),
                    &student_run.text,
                    &expected_run.text,
                ))
            }
            CompareMode::Value | CompareMode::Array => {
                let student_value = student.invoke(out, args)?;
                let expected_value = reference.invoke(out, args)?;

                Ok(comparators::compare_values(
                    out,
                    &mut self.tally,
                    self.comparator.as_ref(),
                    &student_value,
                    &expected_value,
                    mode == CompareMode::Array,
                ))
            }
        }
    }
}
