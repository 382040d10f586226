//! Registered callables and the modules that expose them.
//!
//! Submissions and solutions register their methods on a [`Module`] with a
//! name and a signature. The resolver finds them through
//! [`CallableSource`](crate::traits::introspect::CallableSource), and the
//! session invokes whatever it resolves through [`Callable::invoke`].

use crate::invoke::{self, InvocationError};
use crate::output::OutputChannel;
use crate::traits::introspect::CallableSource;
use crate::types::{TypeDesc, Value};
use std::fmt;
use std::sync::Arc;

/// Body of a registered callable. Anything it "prints" goes through the
/// channel it is handed.
pub type CallableFn = dyn Fn(&mut OutputChannel, &[Value]) -> anyhow::Result<Value> + Send + Sync;

/// A resolved, invocable unit of submitted or reference code.
#[derive(Clone)]
pub struct Callable {
    name: String,
    params: Vec<TypeDesc>,
    returns: TypeDesc,
    body: Arc<CallableFn>,
}

impl Callable {
    pub fn new<F>(name: impl Into<String>, params: Vec<TypeDesc>, returns: TypeDesc, body: F) -> Self
    where
        F: Fn(&mut OutputChannel, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params,
            returns,
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[TypeDesc] {
        &self.params
    }

    pub fn returns(&self) -> &TypeDesc {
        &self.returns
    }

    /// Calls the body with `args`, writing any printed text to `out`.
    ///
    /// Arguments are checked against the declared parameters first. Errors and
    /// panics raised by the body come back as [`InvocationError`]s.
    pub fn invoke(&self, out: &mut OutputChannel, args: &[Value]) -> Result<Value, InvocationError> {
        invoke::invoke(self, self.body.as_ref(), out, args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.returns, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

/// A named, explicitly populated registry of callables.
///
/// Stands in for a class that would otherwise be inspected at runtime.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    callables: Vec<Callable>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callables: Vec::new(),
        }
    }

    /// Registers a callable. Overloads (same name, different parameters) are allowed.
    pub fn register<F>(
        mut self,
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        returns: TypeDesc,
        body: F,
    ) -> Self
    where
        F: Fn(&mut OutputChannel, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.callables.push(Callable::new(name, params, returns, body));
        self
    }
}

impl CallableSource for Module {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_callables(&self) -> &[Callable] {
        &self.callables
    }
}
