/*
 * callout.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that converts callout block quotes and directives to markup.
 */

//! Callout conversion transform.
//!
//! Two source forms are recognised:
//!
//! ```markdown
//! > [!warning]+ Be Careful
//! > Body content here.
//!
//! :::warning[Be Careful]{fold}
//! Body content here.
//! :::
//! ```
//!
//! Both are replaced by the same structure:
//!
//! ```html
//! <div class="callout callout-warning is-collapsible" data-callout="warning" data-collapsible="true">
//!   <div class="callout-title">
//!     <svg class="fold-icon">...</svg>
//!     <svg class="callout-icon">...</svg>
//!     <span class="callout-title-inner">Be Careful</span>
//!   </div>
//!   <div class="callout-content">...</div>
//! </div>
//! ```
//!
//! A block quote with a bare GitHub alert header (`> [!note]`, no title and
//! no fold modifier) is left for the alert renderer. Headers are consumed,
//! so a second run over the output finds nothing to convert.

use std::sync::LazyLock;

use regex::Regex;
use rubric_ast::{BlockQuote, Container, Document, Element, Node, text_content_of};

use super::config::Fold;
use crate::toggle::{COLLAPSED_CLASS, COLLAPSIBLE_CLASS};
use crate::transform::{AstTransform, TransformContext};

pub const DEFAULT_BASE_CLASS: &str = "callout";

/// `[!type]`, `[!type]+`, `[!type]- Title`, ... on the first line.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[!([A-Za-z0-9_]+)\]([+-])?(?:\s+(.+?))?\s*$")
        .expect("invalid callout header regex")
});

/// Header types that are left to the alert renderer when bare.
const ALERT_TYPES: &[&str] = &["note", "tip", "important", "warning", "caution"];

/// Directive names that become callouts.
const DIRECTIVE_TYPES: &[&str] = &[
    "note",
    "tip",
    "important",
    "warning",
    "caution",
    "plain",
    "info",
    "danger",
];

/// SVG path data of the callout icons. Unknown types use the note icon.
const CALLOUT_ICONS: &[(&str, &str)] = &[
    ("note", "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z"),
    (
        "tip",
        "M9.663 17h4.673M12 3v1m6.364 1.636l-.707.707M21 12h-1M4 12H3m3.343-5.657l-.707-.707m2.828 9.9a5 5 0 117.072 0l-.548.547A3.374 3.374 0 0014 18.469V19a2 2 0 11-4 0v-.531c0-.895-.356-1.754-.988-2.386l-.548-.547z",
    ),
    (
        "important",
        "M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z",
    ),
    (
        "warning",
        "M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z",
    ),
    (
        "caution",
        "M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z",
    ),
];

/// Get the icon path for a callout type.
pub fn icon_path(callout_type: &str) -> &'static str {
    CALLOUT_ICONS
        .iter()
        .find(|(name, _)| *name == callout_type)
        .or_else(|| CALLOUT_ICONS.first())
        .map(|(_, path)| *path)
        .unwrap_or_default()
}

/// A parsed `[!type]± Title` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    callout_type: String,
    fold: Fold,
    title: Option<String>,
    has_modifier: bool,
}

/// Transform that converts callouts to structured markup.
pub struct CalloutTransform {
    base_class: String,
}

impl CalloutTransform {
    /// Create a callout transform with the default `callout` base class.
    pub fn new() -> Self {
        Self::with_base_class(DEFAULT_BASE_CLASS)
    }

    pub fn with_base_class(base_class: impl Into<String>) -> Self {
        Self {
            base_class: base_class.into(),
        }
    }

    fn transform_blocks(&self, blocks: &mut [Node], count: &mut usize) {
        for block in blocks.iter_mut() {
            self.transform_block(block, count);
        }
    }

    fn transform_block(&self, block: &mut Node, count: &mut usize) {
        // Nested callouts first
        match block {
            Node::BlockQuote(_) | Node::Container(_) | Node::List(_) | Node::ListItem(_) => {
                if let Some(children) = block.children_mut() {
                    self.transform_blocks(children, count);
                }
            }
            Node::Element(element) if element.flow => {
                self.transform_blocks(&mut element.children, count);
            }
            _ => {}
        }

        let replacement = match block {
            Node::BlockQuote(quote) => self.convert_block_quote(quote),
            Node::Container(container) => self.convert_directive(container),
            _ => None,
        };

        if let Some(callout) = replacement {
            *count += 1;
            *block = callout;
        }
    }

    fn convert_block_quote(&self, quote: &mut BlockQuote) -> Option<Node> {
        let header = peek_header(&quote.children)?;

        if header.title.is_none()
            && !header.has_modifier
            && ALERT_TYPES.contains(&header.callout_type.as_str())
        {
            return None;
        }

        remove_header_line(&mut quote.children);
        let title = header
            .title
            .unwrap_or_else(|| capitalize(&header.callout_type));
        let content = std::mem::take(&mut quote.children);

        tracing::trace!(
            callout_type = %header.callout_type,
            fold = header.fold.as_str(),
            "Converting block quote callout"
        );
        Some(self.build(&header.callout_type, &title, header.fold, content))
    }

    fn convert_directive(&self, container: &mut Container) -> Option<Node> {
        let callout_type = container.name.to_lowercase();
        if !DIRECTIVE_TYPES.contains(&callout_type.as_str()) {
            return None;
        }

        let mut children = std::mem::take(&mut container.children);

        let mut title = None;
        if matches!(children.first(), Some(Node::Paragraph(p)) if p.data.directive_label) {
            if let Node::Paragraph(label) = children.remove(0) {
                let text = text_content_of(&label.children);
                title = Some(text.trim().to_string()).filter(|t| !t.is_empty());
            }
        }
        if let Some(attr_title) = container.attributes.get("title").filter(|t| !t.is_empty()) {
            title = Some(attr_title.clone());
        }

        let mut fold = Fold::from_attribute(container.attributes.get("fold").map(String::as_str));

        if let Some(header) = peek_header(&children) {
            remove_header_line(&mut children);
            fold = fold.merge(header.fold);
            if title.is_none() {
                title = header.title;
            }
        }

        let title = title.unwrap_or_else(|| capitalize(&callout_type));

        tracing::trace!(
            callout_type = %callout_type,
            fold = fold.as_str(),
            "Converting directive callout"
        );
        Some(self.build(&callout_type, &title, fold, children))
    }

    /// Build the callout element.
    fn build(&self, callout_type: &str, title: &str, fold: Fold, content: Vec<Node>) -> Node {
        let mut callout = Element::new("div")
            .flow()
            .with_class(&self.base_class)
            .with_class(&format!("callout-{callout_type}"));
        if fold.is_collapsible() {
            callout.add_class(COLLAPSIBLE_CLASS);
        }
        if fold.is_collapsed() {
            callout.add_class(COLLAPSED_CLASS);
        }
        let callout = callout
            .with_attr("data-callout", callout_type)
            .with_attr("data-collapsible", fold.is_collapsible().to_string());

        let mut title_bar = Element::new("div").flow().with_class("callout-title");
        if fold.is_collapsible() {
            title_bar.children.push(fold_icon());
        }
        if callout_type != "plain" {
            title_bar.children.push(callout_icon(callout_type));
        }
        title_bar.children.push(
            Element::new("span")
                .with_class("callout-title-inner")
                .with_child(Node::text(title))
                .into_node(),
        );

        let body = Element::new("div")
            .flow()
            .with_class("callout-content")
            .with_children(content);

        callout
            .with_child(title_bar.into_node())
            .with_child(body.into_node())
            .into_node()
    }
}

impl Default for CalloutTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl AstTransform for CalloutTransform {
    fn name(&self) -> &str {
        "callout"
    }

    fn transform(&self, doc: &mut Document, ctx: &mut TransformContext) {
        let mut count = 0;
        self.transform_blocks(&mut doc.children, &mut count);
        ctx.record(self.name(), count);
    }
}

/// The first text node of the first paragraph, if the blocks start that way.
fn first_text(blocks: &[Node]) -> Option<&str> {
    match blocks.first()? {
        Node::Paragraph(paragraph) => paragraph.children.first()?.as_text(),
        _ => None,
    }
}

fn peek_header(blocks: &[Node]) -> Option<Header> {
    let text = first_text(blocks)?;
    let first_line = text.split('\n').next().unwrap_or_default();
    let caps = HEADER.captures(first_line)?;
    let modifier = caps.get(2).map(|m| m.as_str());
    Some(Header {
        callout_type: caps.get(1)?.as_str().to_lowercase(),
        fold: Fold::from_modifier(modifier),
        title: caps
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty()),
        has_modifier: modifier.is_some(),
    })
}

/// Remove the header line from the first text node.
///
/// When nothing but whitespace follows the header, the text node goes, and
/// the paragraph too if that leaves it empty.
fn remove_header_line(blocks: &mut Vec<Node>) {
    let Some(Node::Paragraph(paragraph)) = blocks.first_mut() else {
        return;
    };
    let Some(Node::Text(text)) = paragraph.children.first_mut() else {
        return;
    };

    match text.value.split_once('\n') {
        Some((_, rest)) if !rest.trim().is_empty() => {
            text.value = rest.to_string();
        }
        _ => {
            paragraph.children.remove(0);
            if paragraph.children.is_empty() {
                blocks.remove(0);
            }
        }
    }
}

fn svg(class: &str, size: &str) -> Element {
    Element::new("svg")
        .with_class(class)
        .with_attr("xmlns", "http://www.w3.org/2000/svg")
        .with_attr("width", size)
        .with_attr("height", size)
        .with_attr("viewBox", "0 0 24 24")
        .with_attr("fill", "none")
        .with_attr("stroke", "currentColor")
        .with_attr("stroke-width", "2")
        .with_attr("stroke-linecap", "round")
        .with_attr("stroke-linejoin", "round")
}

fn fold_icon() -> Node {
    svg("fold-icon", "16")
        .with_child(
            Element::new("polyline")
                .with_attr("points", "6 9 12 15 18 9")
                .into_node(),
        )
        .into_node()
}

fn callout_icon(callout_type: &str) -> Node {
    svg("callout-icon", "18")
        .with_child(
            Element::new("path")
                .with_attr("d", icon_path(callout_type))
                .into_node(),
        )
        .into_node()
}

/// Capitalize the first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
