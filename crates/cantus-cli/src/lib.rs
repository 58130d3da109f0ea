//! Cantus CLI library
//!
//! Argument definitions and command implementations for the `cantus`
//! binary. Kept as a library so commands stay testable without spawning
//! the binary.

pub mod cli_args;
pub mod commands;
