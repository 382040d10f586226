//!
//! Traits Module
//!
//! Seams of the marker where behaviour can be swapped out.
//!
//! - [`comparator`]: judging a student result against the reference result.
//! - [`introspect`]: listing and looking up the callables a submission exposes.

pub mod comparator;
pub mod introspect;
