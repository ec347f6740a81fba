/*
 * highlight.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that turns `==text==` into highlight marks.
 */

use rubric_ast::{Document, Element, Node};

use super::inline::{InlineRewrite, Staged, rewrite_document};
use super::scan::{Grammar, Match};
use crate::transform::{AstTransform, TransformContext};

pub const HIGHLIGHT_CLASS: &str = "highlight-mark";

/// Rewrites `==text==` into `<span class="highlight-mark">text</span>`.
pub struct HighlightTransform;

impl HighlightTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighlightTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineRewrite for HighlightTransform {
    fn grammar(&self) -> Grammar {
        Grammar::Highlight
    }

    fn rewrite(&self, m: &Match<'_>, _at_end: bool) -> Staged {
        Staged::Done(
            Element::new("span")
                .with_class(HIGHLIGHT_CLASS)
                .with_child(Node::text(m.main))
                .into_node(),
        )
    }
}

impl AstTransform for HighlightTransform {
    fn name(&self) -> &str {
        "highlight"
    }

    fn transform(&self, doc: &mut Document, ctx: &mut TransformContext) {
        let rewrites = rewrite_document(doc, self);
        ctx.record(self.name(), rewrites);
    }
}
