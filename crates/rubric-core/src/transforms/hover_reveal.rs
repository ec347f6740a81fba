/*
 * hover_reveal.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform for ruby and hover-reveal annotations.
 */

//! Ruby and hover-reveal annotations.
//!
//! - `[漢字|かんじ]` becomes `<ruby>漢字<rt>かんじ</rt></ruby>`
//! - `[漢字|かんじ]{tooltip}` wraps that ruby in a hover-reveal span
//! - `[text]{tooltip}` wraps `<span>text</span>` in a hover-reveal span
//!
//! When markdown formatting splits `[漢字|かんじ]` and `{tooltip}` into
//! neighbouring nodes (`*[漢字|かんじ]*{tooltip}`), the tooltip is picked up
//! from the start of the following text sibling.

use rubric_ast::{Document, Element, Node};

use super::inline::{InlineRewrite, PendingRuby, Staged, rewrite_document};
use super::scan::{Grammar, Match, MatchKind};
use crate::transform::{AstTransform, TransformContext};

pub const HOVER_REVEAL_CLASS: &str = "hover-reveal";
pub const TOOLTIP_CLASS: &str = "hover-reveal-tooltip";

/// `<ruby>main<rt>reading</rt></ruby>`
pub fn ruby_element(main: &str, reading: &str) -> Element {
    Element::new("ruby")
        .with_child(Node::text(main))
        .with_child(Element::new("rt").with_child(Node::text(reading)).into_node())
}

/// `<span class="hover-reveal">inner<span class="hover-reveal-tooltip">tooltip</span></span>`
pub fn hover_reveal_element(inner: Node, tooltip: &str) -> Element {
    Element::new("span")
        .with_class(HOVER_REVEAL_CLASS)
        .with_child(inner)
        .with_child(
            Element::new("span")
                .with_class(TOOLTIP_CLASS)
                .with_child(Node::text(tooltip))
                .into_node(),
        )
}

pub struct HoverRevealTransform;

impl HoverRevealTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HoverRevealTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineRewrite for HoverRevealTransform {
    fn grammar(&self) -> Grammar {
        Grammar::Ruby
    }

    fn rewrite(&self, m: &Match<'_>, at_end: bool) -> Staged {
        match (m.kind, m.ruby, m.tooltip) {
            (MatchKind::RubyTooltip, reading, Some(tooltip)) => {
                let inner = match reading {
                    Some(reading) => ruby_element(m.main, reading),
                    None => Element::new("span").with_child(Node::text(m.main)),
                };
                Staged::Done(hover_reveal_element(inner.into_node(), tooltip).into_node())
            }
            (MatchKind::RubyPlain, Some(reading), _) if at_end => Staged::Pending(PendingRuby {
                main: m.main.to_string(),
                reading: reading.to_string(),
            }),
            (MatchKind::RubyPlain, Some(reading), _) => {
                Staged::Done(ruby_element(m.main, reading).into_node())
            }
            // The ruby grammar produces no other combinations
            _ => Staged::Done(Node::text(m.source)),
        }
    }
}

impl AstTransform for HoverRevealTransform {
    fn name(&self) -> &str {
        "hover-reveal"
    }

    fn transform(&self, doc: &mut Document, ctx: &mut TransformContext) {
        let rewrites = rewrite_document(doc, self);
        ctx.record(self.name(), rewrites);
    }
}
