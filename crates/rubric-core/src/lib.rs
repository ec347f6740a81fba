//! Markdown tree transforms for rubric
//!
//! This crate contains the transformation pipeline that turns parsed
//! markdown carrying custom syntax into structured markup:
//!
//! - callouts (`> [!warning]+ Title` block quotes, `:::warning[Title]{fold}` directives)
//! - `==highlight==`
//! - `::weaken::`
//! - `[text|ruby]{tooltip}` ruby and hover-reveal annotations
//!
//! # Architecture
//!
//! - [`AstTransform`] - a tree-in / tree-out pass
//! - [`TransformPipeline`] - ordered passes, built from [`RubricConfig`] by
//!   [`build_pipeline`]
//! - [`html_writer`] - renders the transformed tree
//!
//! # Example
//!
//! ```ignore
//! use rubric_core::{RubricConfig, render_markdown_to_html};
//!
//! let html = render_markdown_to_html("Read [漢字|かんじ]{kanji} ==carefully==.\n", &RubricConfig::default());
//! ```

pub mod config;
pub mod error;
pub mod html_writer;
pub mod pipeline;
pub mod toggle;
pub mod transform;
pub mod transforms;

// Re-export commonly used types
pub use config::{CalloutConfig, ChatConfig, ProviderOverride, RubricConfig, TransformsConfig};
pub use error::{Result, RubricError};
pub use pipeline::{
    RenderOutput, build_pipeline, document_from_json, document_to_json, render_markdown,
    render_markdown_to_html, transform_document,
};
pub use transform::{AstTransform, TransformContext, TransformCount, TransformPipeline};
pub use transforms::{CalloutTransform, HighlightTransform, HoverRevealTransform, WeakenTransform};
