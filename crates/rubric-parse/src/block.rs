/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Convert comrak block nodes to document tree blocks.
 */

use crate::inline::convert_children_to_inlines;
use comrak::arena_tree::Node as ComrakNode;
use comrak::nodes::{Ast, ListType, NodeCodeBlock, NodeList, NodeValue};
use rubric_ast::{BlockQuote, CodeBlock, Heading, Html, List, ListItem, Node};
use std::cell::RefCell;

type AstNode<'a> = ComrakNode<'a, RefCell<Ast>>;

/// Convert a comrak node's block children to tree blocks.
pub fn convert_children_to_blocks<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    node.children().flat_map(convert_block).collect()
}

/// Convert a comrak block node.
///
/// Returns a Vec because unsupported containers are flattened into their
/// children.
fn convert_block<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let ast = node.data.borrow();

    match &ast.value {
        NodeValue::Document => convert_children_to_blocks(node),

        NodeValue::Paragraph => vec![Node::paragraph(convert_children_to_inlines(node))],

        NodeValue::Heading(heading) => vec![Node::Heading(Heading {
            depth: heading.level,
            children: convert_children_to_inlines(node),
        })],

        NodeValue::CodeBlock(code_block) => vec![convert_code_block(code_block)],

        NodeValue::BlockQuote => vec![Node::BlockQuote(BlockQuote {
            children: convert_children_to_blocks(node),
        })],

        NodeValue::List(list) => vec![convert_list(node, list)],

        NodeValue::Item(_) => vec![Node::ListItem(ListItem {
            children: convert_children_to_blocks(node),
        })],

        NodeValue::ThematicBreak => vec![Node::ThematicBreak],

        NodeValue::HtmlBlock(html) => vec![Node::Html(Html {
            value: html.literal.clone(),
        })],

        NodeValue::FrontMatter(_) => vec![],

        // No block extensions are enabled, so anything else is unexpected here.
        // Keep whatever content it carries rather than dropping it.
        _ => {
            tracing::debug!(
                node = ?std::mem::discriminant(&ast.value),
                "Flattening unsupported block node"
            );
            convert_children_to_blocks(node)
        }
    }
}

fn convert_code_block(code_block: &NodeCodeBlock) -> Node {
    // The first word of the info string is the language
    let lang = code_block
        .info
        .split_whitespace()
        .next()
        .map(str::to_string);

    Node::CodeBlock(CodeBlock {
        lang,
        value: code_block.literal.clone(),
    })
}

fn convert_list<'a>(node: &'a AstNode<'a>, list: &NodeList) -> Node {
    let ordered = matches!(list.list_type, ListType::Ordered);
    Node::List(List {
        ordered,
        start: ordered.then_some(list.start),
        spread: !list.tight,
        children: convert_children_to_blocks(node),
    })
}
