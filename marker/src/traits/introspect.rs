//! Introspection Trait
//!
//! [`CallableSource`] is the capability the resolver needs from a submission or
//! solution: list what it exposes and find one callable by exact name and
//! parameter types. How the source was populated is up to the implementor.

use crate::callable::Callable;
use crate::types::TypeDesc;

pub trait CallableSource {
    /// Display name of the source, used in log lines.
    fn name(&self) -> &str;

    /// Every callable the source exposes, in registration order.
    fn list_callables(&self) -> &[Callable];

    /// Finds a callable whose name matches `name` case-exactly and whose
    /// parameter types equal `params` position by position.
    fn lookup(&self, name: &str, params: &[TypeDesc]) -> Option<&Callable> {
        self.list_callables()
            .iter()
            .find(|c| c.name() == name && c.params() == params)
    }
}
