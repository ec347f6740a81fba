/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! `rubric render` parses a markdown file, runs the configured transforms
//! and writes the HTML body (or the transformed tree as JSON).

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rubric_core::{document_to_json, render_markdown};
use tracing::{debug, info};

use super::load_config;

/// What `render` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// HTML body
    #[default]
    Html,
    /// The transformed document tree
    Json,
}

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    /// Input markdown file
    pub input: PathBuf,
    /// Output file; stdout when absent or `-`
    pub output: Option<PathBuf>,
    /// Explicit config file
    pub config: Option<PathBuf>,
    pub to: OutputFormat,
}

/// Render to the output file, or to `out` when writing to stdout.
pub fn run(args: &RenderArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(args.config.as_deref(), Some(&args.input))?;
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let output = render_markdown(&source, &config);
    debug!(rewrites = output.context.total_rewrites(), "Transformed document");

    let rendered = match args.to {
        OutputFormat::Html => output.html,
        OutputFormat::Json => {
            let mut json = document_to_json(&output.document)
                .context("Failed to serialize document tree")?;
            json.push('\n');
            json
        }
    };

    match args.output.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                input = %args.input.display(),
                output = %path.display(),
                "Rendered"
            );
        }
        _ => out
            .write_all(rendered.as_bytes())
            .context("Failed to write output")?,
    }
    Ok(())
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    run(&args, &mut io::stdout().lock())
}
