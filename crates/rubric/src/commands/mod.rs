//! Command implementations for the rubric CLI
//!
//! Each command module handles the CLI interface and delegates to
//! rubric-core for the actual work. `run` writes to any writer; `execute`
//! writes to stdout.

use std::path::Path;

use anyhow::{Context, Result};
use rubric_core::RubricConfig;

pub mod check;
pub mod render;
pub mod transform;

/// Use the explicit config file if given, else the one that applies to
/// `input` (if any).
pub(crate) fn load_config(explicit: Option<&Path>, input: Option<&Path>) -> Result<RubricConfig> {
    match (explicit, input) {
        (Some(path), _) => RubricConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        (None, Some(input)) => RubricConfig::for_input(input)
            .with_context(|| format!("Failed to load config for {}", input.display())),
        (None, None) => Ok(RubricConfig::default()),
    }
}
