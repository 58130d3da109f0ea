//! CLI command implementations

pub mod transcribe;
pub mod validate;
