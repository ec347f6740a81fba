/*
 * check.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Check command implementation
 */

//! `rubric check` reports how many rewrites each transform would make,
//! without writing any output file.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rubric_core::{build_pipeline, render_markdown};

use super::load_config;

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
}

pub fn run(args: &CheckArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(args.config.as_deref(), Some(&args.input))?;
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let output = render_markdown(&source, &config);

    writeln!(out, "{}", args.input.display())?;
    // Every enabled transform is listed, including those with no rewrites
    for name in build_pipeline(&config).transform_names() {
        writeln!(out, "  {:<14}{}", name, output.context.rewrites(name))?;
    }
    writeln!(out, "  {:<14}{}", "total", output.context.total_rewrites())?;
    Ok(())
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    run(&args, &mut io::stdout().lock())
}
