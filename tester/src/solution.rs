//! Reference implementation of the `TextInfo` exercise.

use anyhow::{Context, bail};
use marker::callable::Module;
use marker::output::OutputChannel;
use marker::types::{TypeDesc, Value};
use std::io::Write;

pub fn text_info_sol() -> Module {
    Module::new("TextInfoSol")
        .register(
            "sampleMethod",
            vec![TypeDesc::Int],
            TypeDesc::array_of(TypeDesc::Str),
            sample_method,
        )
        .register("printNumber", vec![TypeDesc::Int], TypeDesc::Void, print_number)
        .register("countVowels", vec![TypeDesc::Str], TypeDesc::Int, count_vowels)
        .register("longestWord", vec![TypeDesc::Str], TypeDesc::Str, longest_word)
}

/// The first `n` lowercase letters, one per element.
fn sample_method(_: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
    let n = args[0].as_int().context("n must be an int")?;
    if !(0..=26).contains(&n) {
        bail!("n must be between 0 and 26, got {n}");
    }
    Ok(Value::array(
        (b'a'..).take(n as usize).map(|b| (b as char).to_string()),
    ))
}

fn print_number(out: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
    writeln!(out, "{}", args[0])?;
    Ok(Value::Null)
}

fn count_vowels(_: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
    let text = args[0].as_str().context("text must not be null")?;
    let count = text
        .chars()
        .filter(|c| "aeiou".contains(c.to_ascii_lowercase()))
        .count();
    Ok(Value::Int(count as i64))
}

/// The longest whitespace-separated word, earliest wins ties. `null` when the
/// text has no words.
fn longest_word(_: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
    let text = args[0].as_str().context("text must not be null")?;
    let longest = text
        .split_whitespace()
        .fold(None, |best: Option<&str>, word| match best {
            Some(b) if b.len() >= word.len() => Some(b),
            _ => Some(word),
        });
    Ok(longest.into())
}
