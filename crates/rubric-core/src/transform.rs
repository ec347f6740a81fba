/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document transformation pipeline infrastructure.
 */

//! Document transformation pipeline infrastructure.
//!
//! This module provides the core abstractions for tree transformations:
//!
//! - [`AstTransform`] - The trait implemented by all transformations
//! - [`TransformPipeline`] - Ordered collection of transforms to execute
//! - [`TransformContext`] - Per-run bookkeeping shared by the transforms
//!
//! # Architecture
//!
//! Transforms are run in a flat, ordered sequence (insertion order). Each
//! transform is a tree-in / tree-out rewrite of the document and records
//! how many rewrites it made in the context.
//!
//! Transforms never fail: syntax they do not recognise is left alone.
//!
//! # Example
//!
//! ```ignore
//! use rubric_core::transform::{AstTransform, TransformContext, TransformPipeline};
//!
//! struct MyTransform;
//!
//! impl AstTransform for MyTransform {
//!     fn name(&self) -> &str { "my-transform" }
//!
//!     fn transform(&self, doc: &mut Document, ctx: &mut TransformContext) {
//!         // Modify the tree...
//!         ctx.record(self.name(), 1);
//!     }
//! }
//!
//! let mut pipeline = TransformPipeline::new();
//! pipeline.push(Box::new(MyTransform));
//! pipeline.execute(&mut doc, &mut TransformContext::new());
//! ```

use rubric_ast::Document;

/// Trait for document transformations.
///
/// # Thread Safety
///
/// Transforms must be `Send + Sync` so that several documents can be
/// transformed in parallel with one pipeline.
pub trait AstTransform: Send + Sync {
    /// Human-readable name for this transform.
    ///
    /// Used for logging and for the rewrite counts in [`TransformContext`].
    fn name(&self) -> &str;

    /// Apply the transformation to the document.
    fn transform(&self, doc: &mut Document, ctx: &mut TransformContext);
}

/// Number of rewrites one transform made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformCount {
    pub transform: String,
    pub rewrites: usize,
}

/// Bookkeeping for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct TransformContext {
    counts: Vec<TransformCount>,
}

impl TransformContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `rewrites` to the count for `transform`.
    pub fn record(&mut self, transform: &str, rewrites: usize) {
        match self.counts.iter_mut().find(|c| c.transform == transform) {
            Some(count) => count.rewrites += rewrites,
            None => self.counts.push(TransformCount {
                transform: transform.to_string(),
                rewrites,
            }),
        }
    }

    /// Rewrites recorded for a transform (0 if it never ran).
    pub fn rewrites(&self, transform: &str) -> usize {
        self.counts
            .iter()
            .find(|c| c.transform == transform)
            .map_or(0, |c| c.rewrites)
    }

    /// Counts in the order the transforms first recorded them.
    pub fn counts(&self) -> &[TransformCount] {
        &self.counts
    }

    pub fn total_rewrites(&self) -> usize {
        self.counts.iter().map(|c| c.rewrites).sum()
    }
}

/// A pipeline of transforms to execute in order.
///
/// Transforms run in insertion order.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn AstTransform>>,
}

impl TransformPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Add a transform to the pipeline.
    ///
    /// Transforms run in the order they are added.
    pub fn push(&mut self, transform: Box<dyn AstTransform>) {
        self.transforms.push(transform);
    }

    /// Add multiple transforms to the pipeline.
    pub fn extend(&mut self, transforms: impl IntoIterator<Item = Box<dyn AstTransform>>) {
        self.transforms.extend(transforms);
    }

    /// Get the number of transforms in the pipeline.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Execute all transforms in insertion order.
    pub fn execute(&self, doc: &mut Document, ctx: &mut TransformContext) {
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Running transform");
            transform.transform(doc, ctx);
            tracing::debug!(
                transform = transform.name(),
                rewrites = ctx.rewrites(transform.name()),
                "Finished transform"
            );
        }
    }

    /// List the names of all transforms in execution order.
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}
