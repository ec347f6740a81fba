/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document tree type definitions for rubric.
 *
 * This crate provides pure data type definitions for the document tree
 * that the markdown front end produces and the transform passes rewrite.
 * It has minimal dependencies (serde, hashlink) and can be used by any
 * crate that needs to build, inspect or serialise documents.
 */

pub mod document;
pub mod element;
pub mod node;

// Re-export commonly used types at the crate root
pub use document::Document;
pub use element::{Attributes, Element};
pub use node::{
    BlockQuote, CodeBlock, Container, Delete, Emphasis, Heading, Html, Image, InlineCode, Link,
    List, ListItem, Node, Paragraph, ParagraphData, Strong, Text, text_content_of,
};
