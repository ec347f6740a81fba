/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform command implementation
 */

//! `rubric transform` runs the pipeline over a document tree in JSON form,
//! so other tools can hand over a tree they produced themselves.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rubric_core::{document_from_json, document_to_json, transform_document};
use tracing::debug;

use super::load_config;

/// Arguments for the transform command
#[derive(Debug)]
pub struct TransformArgs {
    /// JSON tree file; stdin when absent or `-`
    pub input: Option<PathBuf>,
    /// Explicit config file
    pub config: Option<PathBuf>,
}

pub fn run(args: &TransformArgs, stdin: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    let input = args.input.as_deref().filter(|p| p.as_os_str() != "-");
    let config = load_config(args.config.as_deref(), input)?;

    let json = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut json = String::new();
            stdin
                .read_to_string(&mut json)
                .context("Failed to read document tree from stdin")?;
            json
        }
    };

    let mut doc = document_from_json(&json).context("Failed to parse document tree")?;
    let ctx = transform_document(&mut doc, &config);
    debug!(rewrites = ctx.total_rewrites(), "Transformed document tree");

    let json = document_to_json(&doc).context("Failed to serialize document tree")?;
    writeln!(out, "{json}").context("Failed to write output")?;
    Ok(())
}

/// Execute the transform command
pub fn execute(args: TransformArgs) -> Result<()> {
    run(&args, &mut io::stdin().lock(), &mut io::stdout().lock())
}
