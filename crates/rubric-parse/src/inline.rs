/*
 * inline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Convert comrak inline nodes to document tree inlines.
 *
 * comrak splits text at every character that might start markup (`[`, `!`,
 * `*`, ...) and represents soft line breaks as separate nodes. The passes
 * match patterns against text, so soft breaks become "\n" and adjacent text
 * nodes are merged back together.
 */

use comrak::arena_tree::Node as ComrakNode;
use comrak::nodes::{Ast, NodeLink, NodeValue};
use rubric_ast::{Delete, Emphasis, Html, Image, InlineCode, Link, Node, Strong, text_content_of};
use std::cell::RefCell;

type AstNode<'a> = ComrakNode<'a, RefCell<Ast>>;

/// Convert a comrak node's inline children, merging adjacent text.
pub fn convert_children_to_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::new();
    for child in node.children() {
        for inline in convert_inline(child) {
            push_merged(&mut out, inline);
        }
    }
    out
}

fn push_merged(out: &mut Vec<Node>, inline: Node) {
    if let (Some(Node::Text(last)), Node::Text(next)) = (out.last_mut(), &inline) {
        last.value.push_str(&next.value);
        return;
    }
    out.push(inline);
}

fn convert_inline<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let ast = node.data.borrow();

    match &ast.value {
        NodeValue::Text(text) => vec![Node::text(text.to_string())],

        NodeValue::SoftBreak => vec![Node::text("\n")],

        NodeValue::LineBreak => vec![Node::Break],

        NodeValue::Code(code) => vec![Node::InlineCode(InlineCode {
            value: code.literal.clone(),
        })],

        NodeValue::Emph => vec![Node::Emphasis(Emphasis {
            children: convert_children_to_inlines(node),
        })],

        NodeValue::Strong => vec![Node::Strong(Strong {
            children: convert_children_to_inlines(node),
        })],

        NodeValue::Strikethrough => vec![Node::Delete(Delete {
            children: convert_children_to_inlines(node),
        })],

        NodeValue::Link(link) => vec![convert_link(link, convert_children_to_inlines(node))],

        NodeValue::Image(link) => {
            // For images, children become alt text
            let alt = text_content_of(&convert_children_to_inlines(node));
            vec![convert_image(link, alt)]
        }

        NodeValue::HtmlInline(html) => vec![Node::Html(Html {
            value: html.to_string(),
        })],

        // Escaped characters just become the character itself
        NodeValue::Escaped => convert_children_to_inlines(node),

        _ => {
            tracing::debug!(
                node = ?std::mem::discriminant(&ast.value),
                "Flattening unsupported inline node"
            );
            convert_children_to_inlines(node)
        }
    }
}

fn non_empty(title: &str) -> Option<String> {
    (!title.is_empty()).then(|| title.to_string())
}

fn convert_link(link: &NodeLink, children: Vec<Node>) -> Node {
    Node::Link(Link {
        url: link.url.clone(),
        title: non_empty(&link.title),
        children,
    })
}

fn convert_image(link: &NodeLink, alt: String) -> Node {
    Node::Image(Image {
        url: link.url.clone(),
        title: non_empty(&link.title),
        alt,
    })
}
