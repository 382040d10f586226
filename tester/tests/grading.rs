use anyhow::bail;
use marker::callable::Module;
use marker::output::{OutputChannel, SharedBuffer};
use marker::report::SessionSummary;
use marker::session::{CompareMode, MethodSpec, TestCase, TestPlan};
use marker::types::{TypeDesc, Value};
use std::io::Write;
use tester::plan::text_info_plan;
use tester::solution::text_info_sol;
use tester::submission::text_info;

fn run_plan(plan: TestPlan<'_>) -> (SessionSummary, String) {
    let report = SharedBuffer::default();
    let mut out = OutputChannel::new(report.clone());
    let summary = plan.run(&mut out).expect("grading run should complete");
    (summary, report.contents())
}

fn printer(name: &str, text: &'static str) -> Module {
    Module::new(name).register("show", vec![TypeDesc::Int], TypeDesc::Void, move |out, _| {
        write!(out, "{text}")?;
        Ok(Value::Null)
    })
}

fn show_case() -> TestCase {
    TestCase::new(
        MethodSpec::new("show", TypeDesc::Void).params([TypeDesc::Int]),
        CompareMode::Output,
    )
    .input(vec![Value::Int(5)])
}

#[test]
fn test_matching_printed_output_passes() {
    let solution = printer("Solution", "5\n");
    let submission = printer("Submission", "5\n");

    let (summary, report) = run_plan(TestPlan::new(&submission, &solution).case(show_case()));
    assert_eq!((summary.passed, summary.total), (1, 1));
    assert!(report.contains("MATCHES EXPECTED RESULTS?: true"));
}

#[test]
fn test_missing_trailing_newline_fails() {
    let solution = printer("Solution", "5\n");
    let submission = printer("Submission", "5");

    let (summary, report) = run_plan(TestPlan::new(&submission, &solution).case(show_case()));
    assert_eq!((summary.passed, summary.total), (0, 1));
    assert!(report.contains("MATCHES EXPECTED RESULTS?: false"));
}

fn letters(name: &str, items: [&'static str; 3]) -> Module {
    Module::new(name).register(
        "sampleMethod",
        vec![TypeDesc::Int],
        TypeDesc::array_of(TypeDesc::Str),
        move |_, _| Ok(Value::array(items)),
    )
}

fn letters_case() -> TestCase {
    TestCase::new(
        MethodSpec::new("sampleMethod", TypeDesc::array_of(TypeDesc::Str)).params([TypeDesc::Int]),
        CompareMode::Array,
    )
    .input(vec![Value::Int(3)])
}

#[test]
fn test_identical_array_passes() {
    let solution = letters("Solution", ["a", "b", "c"]);
    let submission = letters("Submission", ["a", "b", "c"]);

    let (summary, report) = run_plan(TestPlan::new(&submission, &solution).case(letters_case()));
    assert_eq!(summary.passed, 1);
    assert!(report.contains("Student output: \n[a, b, c]\nExpected output: \n[a, b, c]"));
}

#[test]
fn test_reordered_array_fails() {
    let solution = letters("Solution", ["a", "b", "c"]);
    let submission = letters("Submission", ["a", "c", "b"]);

    let (summary, _) = run_plan(TestPlan::new(&submission, &solution).case(letters_case()));
    assert_eq!(summary.passed, 0);
}

#[test]
fn test_alternate_name_is_graded_with_warning() {
    let solution = letters("Solution", ["a", "b", "c"]);
    let submission = Module::new("Submission").register(
        "SampleMethod",
        vec![TypeDesc::Int],
        TypeDesc::array_of(TypeDesc::Str),
        |_, _| Ok(Value::array(["a", "b", "c"])),
    );

    let mut case = letters_case();
    case.method = case
        .method
        .alternates(["sampleMethod", "samplemethod", "SampleMethod"]);

    let (summary, report) = run_plan(TestPlan::new(&submission, &solution).case(case));
    assert_eq!(summary.passed, 1);
    assert!(report.contains("Method has slightly incorrect name:"));
    assert!(report.contains("\tRequired name: sampleMethod"));
    assert!(report.contains("\tGiven name: SampleMethod"));
}

#[test]
fn test_blocking_return_type_skips_tests() {
    let solution = letters("Solution", ["a", "b", "c"]);
    let submission = Module::new("Submission").register(
        "sampleMethod",
        vec![TypeDesc::Int],
        TypeDesc::Str,
        |_, _| Ok(Value::from("a b c")),
    );

    let (summary, report) = run_plan(TestPlan::new(&submission, &solution).case(letters_case()));
    assert_eq!((summary.passed, summary.total), (0, 1));
    assert!(report.contains("Tests cannot be run on this method because of incorrect return type."));
    assert!(!report.contains("MATCHES EXPECTED RESULTS?"));
}

#[test]
fn test_report_survives_failing_submission() {
    let solution = printer("Solution", "5\n");
    let submission = Module::new("Submission").register(
        "show",
        vec![TypeDesc::Int],
        TypeDesc::Void,
        |out, _| {
            write!(out, "5")?;
            bail!("lost the newline");
        },
    );

    let (summary, report) = run_plan(TestPlan::new(&submission, &solution).case(show_case()));
    assert_eq!(summary.passed, 0);
    assert!(report.contains("AN EXCEPTION WAS THROWN. VIEW THE STACK TRACE BELOW:"));
    assert!(report.contains("show raised an error: lost the newline"));
    assert!(report.contains("NUMBER OF TESTS PASSED: 0/1"));
    assert!(report.contains("DONE TESTING"));
}

#[test]
fn test_bundled_exercise() {
    let submission = text_info();
    let solution = text_info_sol();

    let (summary, report) = run_plan(text_info_plan(&submission, &solution));
    assert_eq!((summary.passed, summary.total), (6, 8));
    assert!(report.contains("--- Testing method sampleMethod ---"));
    assert!(report.contains("\tGiven name: SampleMethod"));
    assert!(report.contains("Expected result is null but student result is not."));
    assert!(report.contains("NUMBER OF TESTS PASSED: 6/8"));

    let begin = report.find("BEGIN TESTING").unwrap();
    let tally = report.find("NUMBER OF TESTS PASSED").unwrap();
    let done = report.find("DONE TESTING").unwrap();
    assert!(begin < tally && tally < done);
}
