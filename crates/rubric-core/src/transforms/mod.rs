/*
 * transforms/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The rubric transforms.
 */

//! The rubric transforms.
//!
//! - [`CalloutTransform`] - Converts callout block quotes and directives
//! - [`HighlightTransform`] - `==text==` highlight marks
//! - [`WeakenTransform`] - `::text::` weakened text
//! - [`HoverRevealTransform`] - `[text|ruby]{tooltip}` annotations
//!
//! These transforms implement [`AstTransform`](crate::transform::AstTransform) and
//! can be added to a [`TransformPipeline`](crate::transform::TransformPipeline).

mod callout;
pub mod config;
mod highlight;
mod hover_reveal;
mod inline;
pub mod scan;
mod weaken;

pub use callout::{CalloutTransform, DEFAULT_BASE_CLASS, icon_path};
pub use highlight::{HIGHLIGHT_CLASS, HighlightTransform};
pub use hover_reveal::{
    HOVER_REVEAL_CLASS, HoverRevealTransform, TOOLTIP_CLASS, hover_reveal_element, ruby_element,
};
pub use weaken::{WEAKENED_ATTR, WEAKENED_CLASS, WeakenTransform};
