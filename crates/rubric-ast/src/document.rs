/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::node::Node;
use serde::{Deserialize, Serialize};

/// The root of a parsed document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }

    /// Count the nodes in the tree matching a predicate.
    pub fn count(&self, predicate: impl Fn(&Node) -> bool) -> usize {
        fn count_in(nodes: &[Node], predicate: &dyn Fn(&Node) -> bool) -> usize {
            nodes
                .iter()
                .map(|node| {
                    let own = usize::from(predicate(node));
                    own + node
                        .children()
                        .map_or(0, |children| count_in(children, predicate))
                })
                .sum()
        }
        count_in(&self.children, &predicate)
    }
}
