//! The bundled grading exercise: a text utility module graded against its
//! reference solution.

pub mod plan;
pub mod solution;
pub mod submission;
