/*
 * weaken.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that turns `::text::` into weakened text.
 */

use rubric_ast::{Document, Element, Node};

use super::inline::{InlineRewrite, Staged, rewrite_document};
use super::scan::{Grammar, Match};
use crate::transform::{AstTransform, TransformContext};

pub const WEAKENED_CLASS: &str = "weakened-text";
/// Attribute the weakened-text toggle keys on.
pub const WEAKENED_ATTR: &str = "data-weakened";

/// Rewrites `::text::` into
/// `<span class="weakened-text" data-weakened="true">text</span>`.
pub struct WeakenTransform;

impl WeakenTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeakenTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineRewrite for WeakenTransform {
    fn grammar(&self) -> Grammar {
        Grammar::Weaken
    }

    fn rewrite(&self, m: &Match<'_>, _at_end: bool) -> Staged {
        Staged::Done(
            Element::new("span")
                .with_class(WEAKENED_CLASS)
                .with_attr(WEAKENED_ATTR, "true")
                .with_child(Node::text(m.main))
                .into_node(),
        )
    }
}

impl AstTransform for WeakenTransform {
    fn name(&self) -> &str {
        "weaken"
    }

    fn transform(&self, doc: &mut Document, ctx: &mut TransformContext) {
        let rewrites = rewrite_document(doc, self);
        ctx.record(self.name(), rewrites);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weaken_mid_text() {
        let mut doc = Document::new(vec![Node::paragraph(vec![Node::text("x ::y:: z")])]);
        let mut ctx = TransformContext::new();
        WeakenTransform::new().transform(&mut doc, &mut ctx);

        let weakened = Element::new("span")
            .with_class("weakened-text")
            .with_attr("data-weakened", "true")
            .with_child(Node::text("y"))
            .into_node();
        assert_eq!(
            doc,
            Document::new(vec![Node::paragraph(vec![
                Node::text("x "),
                weakened,
                Node::text(" z"),
            ])])
        );
        assert_eq!(ctx.rewrites("weaken"), 1);
    }

    #[test]
    fn test_unmatched_text_round_trips() {
        let doc = Document::new(vec![Node::paragraph(vec![
            Node::text("::only one side"),
            Node::strong(vec![Node::text("a : b :: c")]),
        ])]);
        let mut transformed = doc.clone();
        WeakenTransform::new().transform(&mut transformed, &mut TransformContext::new());
        assert_eq!(transformed, doc);
    }
}
