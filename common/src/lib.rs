//! Ambient process setup shared by the grading binaries: configuration and
//! logging.

pub mod config;
pub mod logger;
