/*
 * element.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Generic markup elements emitted by the transform passes.
 */

use crate::node::Node;
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// Ordered attribute map.
///
/// LinkedHashMap preserves insertion order so that rendered markup is
/// stable across runs.
pub type Attributes = LinkedHashMap<String, String>;

/// A markup element: a tag name, attributes and children.
///
/// Renderers map elements directly onto tags. `flow` marks block-level
/// elements (callout containers) as opposed to phrasing ones (spans, ruby).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub flow: bool,
}

impl Element {
    /// Create an inline element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
            flow: false,
        }
    }

    /// Mark this element as flow (block) content.
    pub fn flow(mut self) -> Self {
        self.flow = true;
        self
    }

    /// Add a class name (no-op if already present).
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.replace(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Add a class name to the `class` attribute.
    ///
    /// Classes already present are not repeated, so assigning the same
    /// class twice leaves the attribute unchanged.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        match self.attributes.get_mut("class") {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(class);
            }
            Some(existing) => existing.push_str(class),
            None => {
                self.attributes.insert("class".to_string(), class.to_string());
            }
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Iterate over the whitespace-separated class names.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .get("class")
            .map(String::as_str)
            .unwrap_or_default()
            .split_whitespace()
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn into_node(self) -> Node {
        Node::Element(self)
    }
}
