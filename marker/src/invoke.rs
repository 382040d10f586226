//! Fault-isolated invocation of submitted and reference code.
//!
//! Nothing a callable does may escape the test case that called it: argument
//! mismatches, returned errors and panics all come back as an
//! [`InvocationError`] for the session to report.

use crate::callable::{Callable, CallableFn};
use crate::output::OutputChannel;
use crate::types::{TypeDesc, Value};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("{method} expects {expected} argument(s) but was given {given}")]
    Arity {
        method: String,
        expected: usize,
        given: usize,
    },
    #[error("argument {position} of {method} must be {expected} but was `{given}`")]
    ArgumentMismatch {
        method: String,
        position: usize,
        expected: TypeDesc,
        given: String,
    },
    #[error("{method} raised an error")]
    Raised {
        method: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("{method} panicked: {message}")]
    Panicked { method: String, message: String },
}

impl InvocationError {
    /// The failure as printed in the report. Returned errors carry their
    /// `anyhow` rendering, every cause included.
    pub fn trace(&self) -> String {
        match self {
            InvocationError::Raised { source, .. } => format!("{self}: {source:?}"),
            other => other.to_string(),
        }
    }
}

pub(crate) fn invoke(
    callable: &Callable,
    body: &CallableFn,
    out: &mut OutputChannel,
    args: &[Value],
) -> Result<Value, InvocationError> {
    check_arguments(callable, args)?;

    match panic::catch_unwind(AssertUnwindSafe(|| body(out, args))) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(InvocationError::Raised {
            method: callable.name().to_string(),
            source: err,
        }),
        Err(payload) => Err(InvocationError::Panicked {
            method: callable.name().to_string(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn check_arguments(callable: &Callable, args: &[Value]) -> Result<(), InvocationError> {
    let params = callable.params();
    if params.len() != args.len() {
        return Err(InvocationError::Arity {
            method: callable.name().to_string(),
            expected: params.len(),
            given: args.len(),
        });
    }

    for (i, (param, arg)) in params.iter().zip(args).enumerate() {
        if !arg.conforms_to(param) {
            return Err(InvocationError::ArgumentMismatch {
                method: callable.name().to_string(),
                position: i + 1,
                expected: param.clone(),
                given: arg.to_string(),
            });
        }
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
