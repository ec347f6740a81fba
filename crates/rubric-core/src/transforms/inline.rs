/*
 * inline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Shared traversal for the inline transforms.
 */

//! Shared traversal for the inline transforms.
//!
//! Every paragraph in the document is rewritten in two steps:
//!
//! 1. **Stage**: text nodes (at any depth of inline formatting) are scanned
//!    with the rewriter's grammar and replaced by staged items. Staged items
//!    are finished nodes, or [`Staged::Pending`] ruby annotations that end
//!    exactly at the end of their text node and may still receive a tooltip
//!    from the next sibling.
//! 2. **Resolve**: each children list is walked left to right. A child whose
//!    last-child spine ends in a pending annotation absorbs a `{tooltip}`
//!    token at the start of the following text sibling; any other pending
//!    annotation degrades to a plain ruby.
//!
//! Resolution returns `rubric_ast::Node`, which has no pending variant, so
//! an unresolved annotation can never reach the output tree.

use rubric_ast::{Document, Node};

use super::hover_reveal::{hover_reveal_element, ruby_element};
use super::scan::{Grammar, Match, Scanner, Segment, tooltip_prefix};

/// A ruby annotation whose tooltip may live in the next sibling.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingRuby {
    pub main: String,
    pub reading: String,
}

/// Intermediate form of an inline node during a pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Staged {
    Done(Node),
    Pending(PendingRuby),
    /// A container node whose children were taken out to be staged.
    Open(Node, Vec<Staged>),
}

/// Builds the replacement for one match of an inline grammar.
pub(crate) trait InlineRewrite {
    fn grammar(&self) -> Grammar;

    /// `at_end` is true when the match ends exactly at the end of its text
    /// node.
    fn rewrite(&self, m: &Match<'_>, at_end: bool) -> Staged;
}

/// Rewrite every paragraph in the document.
///
/// Returns the number of matches rewritten.
pub(crate) fn rewrite_document(doc: &mut Document, rewriter: &dyn InlineRewrite) -> usize {
    let mut count = 0;
    rewrite_blocks(&mut doc.children, rewriter, &mut count);
    count
}

fn rewrite_blocks(nodes: &mut [Node], rewriter: &dyn InlineRewrite, count: &mut usize) {
    for node in nodes.iter_mut() {
        match node {
            Node::Paragraph(paragraph) => {
                let children = std::mem::take(&mut paragraph.children);
                paragraph.children = rewrite_inlines(children, rewriter, count);
            }
            // Phrasing elements are inert, flow elements (callouts) hold
            // paragraphs.
            Node::Element(element) if !element.flow => {}
            other => {
                if let Some(children) = other.children_mut() {
                    rewrite_blocks(children, rewriter, count);
                }
            }
        }
    }
}

/// Stage and resolve one inline sequence.
pub(crate) fn rewrite_inlines(
    nodes: Vec<Node>,
    rewriter: &dyn InlineRewrite,
    count: &mut usize,
) -> Vec<Node> {
    resolve(stage_all(nodes, rewriter, count))
}

fn stage_all(nodes: Vec<Node>, rewriter: &dyn InlineRewrite, count: &mut usize) -> Vec<Staged> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => stage_text(text.value, rewriter, count, &mut out),
            // Never rewritten
            Node::InlineCode(_) | Node::Html(_) | Node::Image(_) | Node::Element(_) => {
                out.push(Staged::Done(node))
            }
            mut other => match other.children_mut() {
                Some(children) => {
                    let children = std::mem::take(children);
                    let staged = stage_all(children, rewriter, count);
                    out.push(Staged::Open(other, staged));
                }
                None => out.push(Staged::Done(other)),
            },
        }
    }
    out
}

fn stage_text(value: String, rewriter: &dyn InlineRewrite, count: &mut usize, out: &mut Vec<Staged>) {
    let end = value.len();
    let segments: Vec<Segment<'_>> = Scanner::new(rewriter.grammar(), &value).collect();

    if !segments.iter().any(|s| matches!(s, Segment::Match(_))) {
        // Unmatched text (including empty text) passes through untouched
        out.push(Staged::Done(Node::text(value)));
        return;
    }

    for segment in &segments {
        match segment {
            Segment::Gap(gap) => out.push(Staged::Done(Node::text(*gap))),
            Segment::Match(m) => {
                *count += 1;
                tracing::trace!(kind = ?m.kind, source = m.source, "Rewriting inline match");
                out.push(rewriter.rewrite(m, m.span.end == end));
            }
        }
    }
}

fn ends_in_pending(item: &Staged) -> bool {
    match item {
        Staged::Pending(_) => true,
        Staged::Open(_, children) => children.last().is_some_and(ends_in_pending),
        Staged::Done(_) => false,
    }
}

/// Replace the pending annotation at the end of the last-child spine with a
/// hover-reveal carrying `tooltip`.
fn attach_tooltip(item: &mut Staged, tooltip: &str) {
    match item {
        Staged::Pending(pending) => {
            let node = hover_reveal_element(
                ruby_element(&pending.main, &pending.reading).into_node(),
                tooltip,
            );
            *item = Staged::Done(node.into_node());
        }
        Staged::Open(_, children) => {
            if let Some(last) = children.last_mut() {
                attach_tooltip(last, tooltip);
            }
        }
        Staged::Done(_) => {}
    }
}

fn resolve(staged: Vec<Staged>) -> Vec<Node> {
    let mut out = Vec::with_capacity(staged.len());
    let mut items = staged.into_iter().peekable();

    while let Some(mut item) = items.next() {
        if ends_in_pending(&item) {
            let mut drop_next = false;
            if let Some(Staged::Done(Node::Text(next))) = items.peek_mut() {
                if let Some((tooltip, consumed)) = tooltip_prefix(&next.value) {
                    let tooltip = tooltip.to_string();
                    next.value.replace_range(..consumed, "");
                    drop_next = next.value.is_empty();
                    tracing::trace!(tooltip = %tooltip, "Resolved tooltip from next sibling");
                    attach_tooltip(&mut item, &tooltip);
                }
            }
            if drop_next {
                items.next();
            }
        }
        out.push(finish(item));
    }
    out
}

fn finish(item: Staged) -> Node {
    match item {
        Staged::Done(node) => node,
        Staged::Pending(pending) => ruby_element(&pending.main, &pending.reading).into_node(),
        Staged::Open(mut node, children) => {
            let resolved = resolve(children);
            if let Some(slot) = node.children_mut() {
                *slot = resolved;
            }
            node
        }
    }
}
