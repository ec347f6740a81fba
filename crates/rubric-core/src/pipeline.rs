/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Markdown to HTML pipeline.
 */

//! Markdown to HTML pipeline.
//!
//! 1. **Parse**: markdown source → document tree (via `rubric-parse`)
//! 2. **Transform**: callouts, highlight, weaken, hover-reveal
//! 3. **Render body**: document tree → HTML body
//!
//! ```ignore
//! use rubric_core::{RubricConfig, render_markdown};
//!
//! let output = render_markdown("> [!tip] Hi\n> ==there==\n", &RubricConfig::default());
//! println!("{}", output.html);
//! ```

use rubric_ast::Document;

use crate::config::RubricConfig;
use crate::error::Result;
use crate::html_writer;
use crate::transform::{AstTransform, TransformContext, TransformPipeline};
use crate::transforms::{CalloutTransform, HighlightTransform, HoverRevealTransform, WeakenTransform};

/// Result of rendering one document.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// HTML body
    pub html: String,
    /// The transformed tree
    pub document: Document,
    /// Rewrite counts per transform
    pub context: TransformContext,
}

/// Build the transform pipeline for a configuration.
///
/// Order: callout, hover-reveal, highlight, weaken. Hover-reveal runs
/// first among the inline passes so that a tooltip containing `==` or `::`
/// is taken whole before the other passes split its text run.
pub fn build_pipeline(config: &RubricConfig) -> TransformPipeline {
    let enabled = &config.transforms;
    let mut pipeline = TransformPipeline::new();

    let candidates: [(bool, Box<dyn AstTransform>); 4] = [
        (
            enabled.callout,
            Box::new(CalloutTransform::with_base_class(
                config.callout.base_class.clone(),
            )),
        ),
        (enabled.hover_reveal, Box::new(HoverRevealTransform::new())),
        (enabled.highlight, Box::new(HighlightTransform::new())),
        (enabled.weaken, Box::new(WeakenTransform::new())),
    ];
    pipeline.extend(
        candidates
            .into_iter()
            .filter_map(|(on, transform)| on.then_some(transform)),
    );
    pipeline
}

/// Run the configured transforms over a document in place.
pub fn transform_document(doc: &mut Document, config: &RubricConfig) -> TransformContext {
    let pipeline = build_pipeline(config);
    let mut ctx = TransformContext::new();
    pipeline.execute(doc, &mut ctx);
    ctx
}

/// Parse, transform and render markdown.
pub fn render_markdown(source: &str, config: &RubricConfig) -> RenderOutput {
    let mut document = rubric_parse::parse_markdown(source);
    let context = transform_document(&mut document, config);
    let html = html_writer::to_string(&document);
    RenderOutput {
        html,
        document,
        context,
    }
}

/// Parse, transform and render markdown to an HTML body.
pub fn render_markdown_to_html(source: &str, config: &RubricConfig) -> String {
    render_markdown(source, config).html
}

/// Read a document tree from its JSON form.
pub fn document_from_json(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}

/// Write a document tree as pretty-printed JSON.
pub fn document_to_json(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}
