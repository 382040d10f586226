//! # Marker Library
//!
//! Grades a submitted implementation against a reference implementation that
//! exposes the same method signatures.
//!
//! ## Key Concepts
//! - **Modules**: submissions and solutions register their callables on a
//!   [`callable::Module`] and are looked up through
//!   [`traits::introspect::CallableSource`].
//! - **Resolver**: finds a submitted method by its canonical name or an
//!   accepted misspelling, then checks its return type.
//! - **OutputChannel**: the single sink for report text and for anything a
//!   callable prints; can be redirected around one call to capture output.
//! - **Comparators**: pluggable strategies for judging a student result
//!   against the reference result.
//! - **TestPlan / TestSession**: declare test cases, run them with fault
//!   isolation between cases, and print a pass/total report.
//!
//! ## Example
//!
//! ```rust
//! use marker::callable::Module;
//! use marker::output::{OutputChannel, SharedBuffer};
//! use marker::session::{CompareMode, MethodSpec, TestCase, TestPlan};
//! use marker::types::{TypeDesc, Value};
//!
//! fn square(_: &mut OutputChannel, args: &[Value]) -> anyhow::Result<Value> {
//!     let n = args[0].as_int().unwrap_or_default();
//!     Ok(Value::Int(n * n))
//! }
//!
//! let submission = Module::new("Submission")
//!     .register("Square", vec![TypeDesc::Int], TypeDesc::Int, square);
//! let solution = Module::new("Solution")
//!     .register("square", vec![TypeDesc::Int], TypeDesc::Int, square);
//!
//! let plan = TestPlan::new(&submission, &solution).case(
//!     TestCase::new(
//!         MethodSpec::new("square", TypeDesc::Int)
//!             .params([TypeDesc::Int])
//!             .alternates(["Square"]),
//!         CompareMode::Value,
//!     )
//!     .input(vec![Value::Int(4)]),
//! );
//!
//! let report = SharedBuffer::default();
//! let summary = plan.run(&mut OutputChannel::new(report.clone())).unwrap();
//! assert_eq!((summary.passed, summary.total), (1, 1));
//! assert!(report.contents().contains("Given name: Square"));
//! ```

pub mod callable;
pub mod comparators;
pub mod error;
pub mod invoke;
pub mod output;
pub mod report;
pub mod resolver;
pub mod session;
pub mod traits;
pub mod types;
