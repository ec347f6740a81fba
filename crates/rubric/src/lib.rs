//! rubric command-line interface
//!
//! The binary in `main.rs` parses arguments and dispatches to the command
//! modules here, which are also driven directly by the integration tests.

pub mod commands;
