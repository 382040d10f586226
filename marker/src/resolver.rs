//! Tolerant method resolution.
//!
//! Submissions are looked up by their canonical name first, then by each
//! alternate spelling in order. Naming is forgiving; return types are not: a
//! mismatched return type blocks the method's tests unless the method is
//! expected to return nothing, in which case the mismatch is only reported.

use crate::callable::Callable;
use crate::output::OutputChannel;
use crate::report;
use crate::traits::introspect::CallableSource;
use crate::types::TypeDesc;

#[derive(Debug, Clone)]
pub enum ResolutionOutcome {
    Found {
        candidate: Callable,
        /// False when the match came from an alternate name.
        name_was_exact: bool,
    },
    NotFound,
}

impl ResolutionOutcome {
    pub fn into_candidate(self) -> Option<Callable> {
        match self {
            ResolutionOutcome::Found { candidate, .. } => Some(candidate),
            ResolutionOutcome::NotFound => None,
        }
    }
}

/// Outcome of comparing a declared return type with the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCheck {
    pub matches: bool,
    /// Set when the expected type is `void`; such checks never block.
    pub advisory: bool,
    /// Empty when `matches` is true.
    pub diagnostic: String,
}

impl SignatureCheck {
    pub fn blocks_invocation(&self) -> bool {
        !self.matches && !self.advisory
    }
}

pub struct MethodResolver<'a> {
    target: &'a dyn CallableSource,
}

impl<'a> MethodResolver<'a> {
    pub fn new(target: &'a dyn CallableSource) -> Self {
        Self { target }
    }

    /// Looks up `canonical`, then each of `alternates` in order, against the
    /// exact parameter signature `params`.
    ///
    /// Every name that fails is reported; nothing is raised.
    pub fn resolve(
        &self,
        out: &mut OutputChannel,
        canonical: &str,
        alternates: &[String],
        params: &[TypeDesc],
    ) -> ResolutionOutcome {
        if let Some(found) = self.find(out, canonical, params) {
            return ResolutionOutcome::Found {
                candidate: found,
                name_was_exact: true,
            };
        }

        for name in alternates.iter().filter(|name| *name != canonical) {
            if let Some(found) = self.find(out, name, params) {
                return ResolutionOutcome::Found {
                    candidate: found,
                    name_was_exact: false,
                };
            }
        }

        tracing::warn!(
            source = self.target.name(),
            method = canonical,
            "no callable matched the canonical name or any alternate"
        );
        ResolutionOutcome::NotFound
    }

    fn find(&self, out: &mut OutputChannel, name: &str, params: &[TypeDesc]) -> Option<Callable> {
        let found = self.target.lookup(name, params).cloned();
        if found.is_none() {
            report::missing_method(out, name);
        }
        found
    }

    /// Compares the candidate's declared return type with `expected`.
    ///
    /// A mismatch is always reported. It only blocks when `expected` is not
    /// `void`.
    pub fn validate_return_type(
        &self,
        out: &mut OutputChannel,
        candidate: &Callable,
        expected: &TypeDesc,
    ) -> SignatureCheck {
        let advisory = expected.is_void();

        if candidate.returns() == expected {
            return SignatureCheck {
                matches: true,
                advisory,
                diagnostic: String::new(),
            };
        }

        let diagnostic = report::return_type_text(expected, candidate.returns());
        out.emit(&diagnostic);
        tracing::warn!(
            source = self.target.name(),
            method = candidate.name(),
            required = %expected,
            given = %candidate.returns(),
            blocking = !advisory,
            "return type mismatch"
        );

        SignatureCheck {
            matches: false,
            advisory,
            diagnostic,
        }
    }

    /// Resolves and validates a submitted method in one step.
    ///
    /// Returns `None`, with the reason already reported, when no name matched
    /// or the return type check blocks.
    pub fn get_validated_callable(
        &self,
        out: &mut OutputChannel,
        canonical: &str,
        expected_return: &TypeDesc,
        alternates: &[String],
        params: &[TypeDesc],
    ) -> Option<Callable> {
        let (candidate, name_was_exact) = match self.resolve(out, canonical, alternates, params) {
            ResolutionOutcome::Found {
                candidate,
                name_was_exact,
            } => (candidate, name_was_exact),
            ResolutionOutcome::NotFound => {
                report::cannot_find(out);
                return None;
            }
        };

        if !name_was_exact {
            report::naming_warning(out, canonical, candidate.name());
            tracing::warn!(
                source = self.target.name(),
                required = canonical,
                given = candidate.name(),
                "method matched through an alternate name"
            );
        }

        let check = self.validate_return_type(out, &candidate, expected_return);
        if check.blocks_invocation() {
            report::return_type_blocked(out);
            return None;
        }

        Some(candidate)
    }
}
