/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::element::{Attributes, Element};
use serde::{Deserialize, Serialize};

/// A node of the document tree.
///
/// Parents own their children exclusively; there are no back references.
/// The serialised form is tagged by `type`, loosely following mdast so that
/// trees produced by other markdown tooling can be fed in as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Text(Text),
    Paragraph(Paragraph),
    Heading(Heading),
    #[serde(rename = "blockquote")]
    BlockQuote(BlockQuote),
    /// A directive container (`:::name[label]{attrs}`)
    #[serde(rename = "containerDirective")]
    Container(Container),
    List(List),
    ListItem(ListItem),
    #[serde(rename = "code")]
    CodeBlock(CodeBlock),
    ThematicBreak,
    Html(Html),
    Emphasis(Emphasis),
    Strong(Strong),
    Delete(Delete),
    InlineCode(InlineCode),
    Link(Link),
    Image(Image),
    Break,
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "ParagraphData::is_empty")]
    pub data: ParagraphData,
}

/// Pass-specific flags attached to a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphData {
    /// This paragraph holds the `[label]` of a directive container.
    #[serde(default)]
    pub directive_label: bool,
}

impl ParagraphData {
    pub fn is_empty(&self) -> bool {
        !self.directive_label
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockQuote {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// Loose lists wrap item content in paragraphs when rendered.
    #[serde(default)]
    pub spread: bool,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Emphasis {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Strong {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Delete {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineCode {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub alt: String,
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
        })
    }

    /// Create a paragraph node.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph {
            children,
            data: ParagraphData::default(),
        })
    }

    /// Create a block quote node.
    pub fn block_quote(children: Vec<Node>) -> Self {
        Node::BlockQuote(BlockQuote { children })
    }

    /// Create an emphasis node.
    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis { children })
    }

    /// Create a strong node.
    pub fn strong(children: Vec<Node>) -> Self {
        Node::Strong(Strong { children })
    }

    /// The text payload, if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.value),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Borrow the children of a node that has them.
    ///
    /// Leaf nodes (text, code, html, breaks, images) return `None`.
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Paragraph(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::BlockQuote(n) => Some(&n.children),
            Node::Container(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Delete(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::Element(n) => Some(&n.children),
            Node::Text(_)
            | Node::CodeBlock(_)
            | Node::ThematicBreak
            | Node::Html(_)
            | Node::InlineCode(_)
            | Node::Image(_)
            | Node::Break => None,
        }
    }

    /// Mutably borrow the children of a node that has them.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::BlockQuote(n) => Some(&mut n.children),
            Node::Container(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Delete(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::Element(n) => Some(&mut n.children),
            Node::Text(_)
            | Node::CodeBlock(_)
            | Node::ThematicBreak
            | Node::Html(_)
            | Node::InlineCode(_)
            | Node::Image(_)
            | Node::Break => None,
        }
    }

    /// Phrasing content, as opposed to flow content.
    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text(_)
            | Node::Emphasis(_)
            | Node::Strong(_)
            | Node::Delete(_)
            | Node::InlineCode(_)
            | Node::Link(_)
            | Node::Image(_)
            | Node::Break => true,
            Node::Element(element) => !element.flow,
            _ => false,
        }
    }

    /// The text a reader sees when this node is rendered.
    ///
    /// Concatenates text payloads and inline code in document order. Breaks
    /// count as a newline; images contribute their alt text.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&text.value),
            Node::InlineCode(code) => out.push_str(&code.value),
            Node::CodeBlock(code) => out.push_str(&code.value),
            Node::Image(image) => out.push_str(&image.alt),
            Node::Break => out.push('\n'),
            Node::Html(_) | Node::ThematicBreak => {}
            other => {
                if let Some(children) = other.children() {
                    for child in children {
                        child.collect_text(out);
                    }
                }
            }
        }
    }
}

/// Concatenate the rendered text of a sequence of nodes.
pub fn text_content_of(nodes: &[Node]) -> String {
    nodes.iter().map(Node::text_content).collect()
}
