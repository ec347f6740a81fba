/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Convert markdown source to the rubric document tree.
 *
 * CommonMark (plus strikethrough and autolinks) is parsed with comrak and
 * converted to owned `rubric_ast` nodes. Directive containers
 * (`:::name[label]{attrs}` ... `:::`) are recognised before comrak sees the
 * source and become `Container` nodes.
 */

mod block;
pub mod directive;
mod inline;

use comrak::{Arena, Options, parse_document};
use rubric_ast::{Container, Document, Node, Paragraph, ParagraphData};

use crate::directive::{Chunk, DirectiveBlock};

/// Parse markdown source into a document tree.
///
/// Parsing never fails: anything comrak cannot interpret is kept as text,
/// and an unclosed directive container runs to the end of the document.
pub fn parse_markdown(source: &str) -> Document {
    let chunks = directive::split(source);
    Document::new(convert_chunks(&chunks))
}

fn convert_chunks(chunks: &[Chunk]) -> Vec<Node> {
    chunks
        .iter()
        .flat_map(|chunk| match chunk {
            Chunk::Markdown(text) => parse_blocks(text),
            Chunk::Directive(directive) => vec![convert_directive(directive)],
        })
        .collect()
}

fn convert_directive(directive: &DirectiveBlock) -> Node {
    let mut children = Vec::new();
    if let Some(label) = directive.label.as_deref().filter(|l| !l.trim().is_empty()) {
        children.push(Node::Paragraph(Paragraph {
            children: parse_label(label),
            data: ParagraphData {
                directive_label: true,
            },
        }));
    }
    children.extend(convert_chunks(&directive.body));

    Node::Container(Container {
        name: directive.name.clone(),
        attributes: directive.attributes.clone(),
        children,
    })
}

/// Parse a directive label as inline markdown.
///
/// A label that does not parse to a single paragraph (`# x`, `- x`, ...)
/// is kept as literal text.
fn parse_label(label: &str) -> Vec<Node> {
    match parse_blocks(label).as_mut_slice() {
        [Node::Paragraph(paragraph)] => std::mem::take(&mut paragraph.children),
        _ => vec![Node::text(label)],
    }
}

/// Parse a run of plain markdown (no directive fences) into block nodes.
fn parse_blocks(markdown: &str) -> Vec<Node> {
    if markdown.trim().is_empty() {
        return Vec::new();
    }
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, markdown, &options);
    block::convert_children_to_blocks(root)
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}
