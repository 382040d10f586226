//! A student's attempt at the `TextInfo` exercise.
//!
//! It is graded as submitted: `sampleMethod` was registered under the wrong
//! capitalisation, `countVowels` ignores capitals and `longestWord` returns an
//! empty string where the reference returns null.

use anyhow::{Context, ensure};
use marker::callable::Module;
use marker::output::OutputChannel;
use marker::types::{TypeDesc, Value};
use std::io::Write;

pub fn text_info() -> Module {
    Module::new("TextInfo")
        .register(
            "SampleMethod",
            vec![TypeDesc::Int],
            TypeDesc::array_of(TypeDesc::Str),
            sample_method,
        )
        .register("printNumber", vec![TypeDesc::Int], TypeDesc::Void, print_number)
        .register("countVowels", vec![TypeDesc::Str], TypeDesc::Int, count_vowels)
        .register("longestWord", vec![TypeDesc::Str], TypeDesc::Str, longest_word)
}

fn sample_method(_: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
    let n = args[0].as_int().context("expected an int")?;
    ensure!(n >= 0, "negative length {n}");
    let letters: Vec<String> = "abcdefghijklmnopqrstuvwxyz"
        .chars()
        .take(n as usize)
        .map(String::from)
        .collect();
    Ok(Value::array(letters))
}

fn print_number(out: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
    let n = args[0].as_int().context("expected an int")?;
    writeln!(out, "{n}")?;
    Ok(Value::Null)
}

fn count_vowels(_: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
    let text = args[0].as_str().context("expected a string")?;
    let count = text.chars().filter(|c| "aeiou".contains(*c)).count();
    Ok(Value::Int(count as i64))
}

fn longest_word(_: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
    let text = args[0].as_str().context("expected a string")?;
    let mut longest = "";
    for word in text.split_whitespace() {
        if word.len() > longest.len() {
            longest = word;
        }
    }
    Ok(Value::from(longest))
}
