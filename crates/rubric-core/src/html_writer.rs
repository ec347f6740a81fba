/*
 * html_writer.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * HTML writer for transformed documents.
 */

//! HTML writer for transformed documents.
//!
//! Markdown nodes map onto their usual tags. Elements emitted by the
//! transforms are written as-is: name as tag, attributes in insertion order.
//! Flow elements get their own lines; phrasing elements stay inline.

use std::io::{self, Write};
use std::sync::LazyLock;

use regex::Regex;
use rubric_ast::{Attributes, Document, Element, Node};

/// Tag names the writer will emit verbatim.
static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("valid regex"));

/// Attribute names the writer will emit verbatim.
static ATTRIBUTE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_:][A-Za-z0-9_:.-]*$").expect("valid regex"));

/// Main entry point: render a document body to HTML.
pub fn write<W: Write>(doc: &Document, buf: &mut W) -> io::Result<()> {
    write_nodes(&doc.children, buf)
}

/// Render a document body to an HTML string.
pub fn to_string(doc: &Document) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    let _ = write(doc, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write a sequence of nodes.
pub fn write_nodes<W: Write>(nodes: &[Node], buf: &mut W) -> io::Result<()> {
    for node in nodes {
        write_node(node, buf)?;
    }
    Ok(())
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Write attributes in insertion order.
///
/// Keys that are not valid attribute names are dropped.
fn write_attributes<W: Write>(attributes: &Attributes, buf: &mut W) -> io::Result<()> {
    for (key, value) in attributes {
        if !ATTRIBUTE_NAME.is_match(key) {
            tracing::warn!(attribute = %key, "Dropping invalid attribute name");
            continue;
        }
        write!(buf, " {}=\"{}\"", key, escape_html(value))?;
    }
    Ok(())
}

/// The tag to write for an element.
///
/// Trees can arrive as external JSON, so a name that is not a plain tag
/// name falls back to `div` (flow) or `span` (phrasing).
fn tag_name(element: &Element) -> &str {
    if TAG_NAME.is_match(&element.name) {
        return &element.name;
    }
    tracing::warn!(name = %element.name, "Replacing invalid element name");
    if element.flow { "div" } else { "span" }
}

fn write_node<W: Write>(node: &Node, buf: &mut W) -> io::Result<()> {
    match node {
        Node::Text(text) => {
            write!(buf, "{}", escape_html(&text.value))?;
        }
        Node::Paragraph(para) => {
            write!(buf, "<p>")?;
            write_nodes(&para.children, buf)?;
            writeln!(buf, "</p>")?;
        }
        Node::Heading(heading) => {
            write!(buf, "<h{}>", heading.depth)?;
            write_nodes(&heading.children, buf)?;
            writeln!(buf, "</h{}>", heading.depth)?;
        }
        Node::BlockQuote(quote) => {
            writeln!(buf, "<blockquote>")?;
            write_nodes(&quote.children, buf)?;
            writeln!(buf, "</blockquote>")?;
        }
        Node::Container(container) => {
            // Directives no transform claimed
            let class = match container.attributes.get("class") {
                Some(extra) => format!("{} {}", container.name, extra),
                None => container.name.clone(),
            };
            write!(buf, "<div class=\"{}\"", escape_html(&class))?;
            for (key, value) in &container.attributes {
                if key != "class" {
                    write!(buf, " {}=\"{}\"", escape_html(key), escape_html(value))?;
                }
            }
            writeln!(buf, ">")?;
            write_nodes(&container.children, buf)?;
            writeln!(buf, "</div>")?;
        }
        Node::List(list) => {
            if list.ordered {
                write!(buf, "<ol")?;
                if let Some(start) = list.start.filter(|s| *s != 1) {
                    write!(buf, " start=\"{}\"", start)?;
                }
                writeln!(buf, ">")?;
            } else {
                writeln!(buf, "<ul>")?;
            }
            for item in &list.children {
                write_list_item(item, list.spread, buf)?;
            }
            writeln!(buf, "{}", if list.ordered { "</ol>" } else { "</ul>" })?;
        }
        Node::ListItem(item) => {
            write!(buf, "<li>")?;
            write_nodes(&item.children, buf)?;
            writeln!(buf, "</li>")?;
        }
        Node::CodeBlock(code) => {
            write!(buf, "<pre><code")?;
            if let Some(lang) = &code.lang {
                write!(buf, " class=\"language-{}\"", escape_html(lang))?;
            }
            write!(buf, ">{}", escape_html(&code.value))?;
            writeln!(buf, "</code></pre>")?;
        }
        Node::ThematicBreak => {
            writeln!(buf, "<hr />")?;
        }
        Node::Html(html) => {
            write!(buf, "{}", html.value)?;
        }
        Node::Emphasis(e) => {
            write!(buf, "<em>")?;
            write_nodes(&e.children, buf)?;
            write!(buf, "</em>")?;
        }
        Node::Strong(s) => {
            write!(buf, "<strong>")?;
            write_nodes(&s.children, buf)?;
            write!(buf, "</strong>")?;
        }
        Node::Delete(d) => {
            write!(buf, "<del>")?;
            write_nodes(&d.children, buf)?;
            write!(buf, "</del>")?;
        }
        Node::InlineCode(code) => {
            write!(buf, "<code>{}</code>", escape_html(&code.value))?;
        }
        Node::Link(link) => {
            write!(buf, "<a href=\"{}\"", escape_html(&link.url))?;
            if let Some(title) = &link.title {
                write!(buf, " title=\"{}\"", escape_html(title))?;
            }
            write!(buf, ">")?;
            write_nodes(&link.children, buf)?;
            write!(buf, "</a>")?;
        }
        Node::Image(image) => {
            write!(
                buf,
                "<img src=\"{}\" alt=\"{}\"",
                escape_html(&image.url),
                escape_html(&image.alt)
            )?;
            if let Some(title) = &image.title {
                write!(buf, " title=\"{}\"", escape_html(title))?;
            }
            write!(buf, " />")?;
        }
        Node::Break => {
            writeln!(buf, "<br />")?;
        }
        Node::Element(element) => {
            let name = tag_name(element);
            write!(buf, "<{}", name)?;
            write_attributes(&element.attributes, buf)?;
            write!(buf, ">")?;
            if element.flow {
                writeln!(buf)?;
            }
            write_nodes(&element.children, buf)?;
            if element.flow && !ends_with_block(&element.children) {
                writeln!(buf)?;
            }
            write!(buf, "</{}>", name)?;
            if element.flow {
                writeln!(buf)?;
            }
        }
    }
    Ok(())
}

/// Whether the children (if any) already ended their own line.
fn ends_with_block(children: &[Node]) -> bool {
    children.last().is_none_or(|last| !last.is_inline())
}

/// Tight list items drop the `<p>` around their paragraphs.
fn write_list_item<W: Write>(item: &Node, spread: bool, buf: &mut W) -> io::Result<()> {
    let Node::ListItem(item) = item else {
        return write_node(item, buf);
    };
    if spread {
        writeln!(buf, "<li>")?;
        write_nodes(&item.children, buf)?;
        return writeln!(buf, "</li>");
    }

    write!(buf, "<li>")?;
    let count = item.children.len();
    for (i, child) in item.children.iter().enumerate() {
        match child {
            Node::Paragraph(para) => {
                write_nodes(&para.children, buf)?;
                if i + 1 < count {
                    writeln!(buf)?;
                }
            }
            other => write_node(other, buf)?,
        }
    }
    writeln!(buf, "</li>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubric_ast::{Heading, Html, InlineCode, Link, List, ListItem};

    fn render(nodes: Vec<Node>) -> String {
        to_string(&Document::new(nodes))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_write_paragraph() {
        assert_eq!(
            render(vec![Node::paragraph(vec![Node::text("Hello World")])]),
            "<p>Hello World</p>\n"
        );
    }

    #[test]
    fn test_inline_element() {
        let mark = Element::new("span")
            .with_class("highlight-mark")
            .with_child(Node::text("b"))
            .into_node();
        assert_eq!(
            render(vec![Node::paragraph(vec![
                Node::text("a "),
                mark,
                Node::text(" c")
            ])]),
            "<p>a <span class=\"highlight-mark\">b</span> c</p>\n"
        );
    }

    #[test]
    fn test_invalid_element_name_is_replaced() {
        let inline = Element::new("img src=x onerror=alert(1)")
            .with_child(Node::text("t"))
            .into_node();
        assert_eq!(
            render(vec![Node::paragraph(vec![inline])]),
            "<p><span>t</span></p>\n"
        );

        let flow = Element::new("script><b").flow().into_node();
        assert_eq!(render(vec![flow]), "<div>\n</div>\n");
    }

    #[test]
    fn test_invalid_attribute_name_is_dropped() {
        let span = Element::new("span")
            .with_attr("x onmouseover=alert(1)", "v")
            .with_attr("data-ok", "1")
            .into_node();
        assert_eq!(
            render(vec![Node::paragraph(vec![span])]),
            "<p><span data-ok=\"1\"></span></p>\n"
        );
    }

    #[test]
    fn test_flow_element_lines() {
        let div = Element::new("div")
            .flow()
            .with_class("callout-content")
            .with_child(Node::paragraph(vec![Node::text("x")]))
            .into_node();
        assert_eq!(
            render(vec![div]),
            "<div class=\"callout-content\">\n<p>x</p>\n</div>\n"
        );
    }

    #[test]
    fn test_flow_element_with_inline_children() {
        let div = Element::new("div")
            .flow()
            .with_child(Element::new("span").with_child(Node::text("t")).into_node())
            .into_node();
        assert_eq!(render(vec![div]), "<div>\n<span>t</span>\n</div>\n");
    }

    #[test]
    fn test_tight_and_loose_lists() {
        let items = || {
            vec![
                Node::ListItem(ListItem {
                    children: vec![Node::paragraph(vec![Node::text("a")])],
                }),
                Node::ListItem(ListItem {
                    children: vec![Node::paragraph(vec![Node::text("b")])],
                }),
            ]
        };
        let tight = Node::List(List {
            ordered: false,
            start: None,
            spread: false,
            children: items(),
        });
        assert_eq!(render(vec![tight]), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");

        let loose = Node::List(List {
            ordered: true,
            start: Some(3),
            spread: true,
            children: items(),
        });
        assert_eq!(
            render(vec![loose]),
            "<ol start=\"3\">\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_code_link_heading() {
        let out = render(vec![
            Node::Heading(Heading {
                depth: 2,
                children: vec![Node::text("T")],
            }),
            Node::paragraph(vec![
                Node::InlineCode(InlineCode {
                    value: "a<b".to_string(),
                }),
                Node::Link(Link {
                    url: "https://x.org/?a=1&b=2".to_string(),
                    title: Some("X".to_string()),
                    children: vec![Node::text("x")],
                }),
            ]),
        ]);
        assert_eq!(
            out,
            "<h2>T</h2>\n<p><code>a&lt;b</code><a href=\"https://x.org/?a=1&amp;b=2\" title=\"X\">x</a></p>\n"
        );
    }

    #[test]
    fn test_raw_html_is_not_escaped() {
        assert_eq!(
            render(vec![Node::Html(Html {
                value: "<div>raw</div>\n".to_string()
            })]),
            "<div>raw</div>\n"
        );
    }
}
