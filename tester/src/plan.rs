//! Test cases for the `TextInfo` exercise.

use marker::session::{CompareMode, MethodSpec, TestCase, TestPlan};
use marker::traits::introspect::CallableSource;
use marker::types::{TypeDesc, Value};

pub fn text_info_plan<'a>(
    submission: &'a dyn CallableSource,
    solution: &'a dyn CallableSource,
) -> TestPlan<'a> {
    TestPlan::new(submission, solution)
        .case(sample_method_tests())
        .case(print_number_tests())
        .case(count_vowels_tests())
        .case(longest_word_tests())
}

fn sample_method_tests() -> TestCase {
    let method = MethodSpec::new("sampleMethod", TypeDesc::array_of(TypeDesc::Str))
        .params([TypeDesc::Int])
        .alternates(["sampleMethod", "samplemethod", "SampleMethod"]);

    TestCase::new(method, CompareMode::Array)
        .input(vec![Value::Int(3)])
        .input(vec![Value::Int(0)])
}

fn print_number_tests() -> TestCase {
    let method = MethodSpec::new("printNumber", TypeDesc::Void)
        .params([TypeDesc::Int])
        .alternates(["printnumber", "PrintNumber", "printNum"]);

    TestCase::new(method, CompareMode::Output)
        .input(vec![Value::Int(5)])
        .input(vec![Value::Int(-12)])
}

fn count_vowels_tests() -> TestCase {
    let method = MethodSpec::new("countVowels", TypeDesc::Int)
        .params([TypeDesc::Str])
        .alternates(["countvowels", "CountVowels", "countVowel"]);

    TestCase::new(method, CompareMode::Value)
        .input(vec![Value::from("banana")])
        .input(vec![Value::from("EDUCATION")])
}

fn longest_word_tests() -> TestCase {
    let method = MethodSpec::new("longestWord", TypeDesc::Str)
        .params([TypeDesc::Str])
        .alternates(["longestword", "LongestWord"]);

    TestCase::new(method, CompareMode::Value)
        .input(vec![Value::from("the quick brown fox")])
        .input(vec![Value::from("")])
}
