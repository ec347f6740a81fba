/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Shared configuration enums for transforms.
 */

//! Shared configuration types for the transforms.

/// Whether a callout can be folded, and its initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fold {
    /// Always open (default)
    #[default]
    None,
    /// Collapsible, initially open
    Expanded,
    /// Collapsible, initially closed
    Collapsed,
}

impl Fold {
    /// Parse the `+`/`-` modifier of a `[!type]` header.
    pub fn from_modifier(modifier: Option<&str>) -> Self {
        match modifier {
            Some("+") => Self::Expanded,
            Some("-") => Self::Collapsed,
            _ => Self::None,
        }
    }

    /// Parse the `fold` attribute of a directive container.
    ///
    /// Any `fold` attribute makes the callout collapsible; `{fold}`,
    /// `{fold=true}` and `{fold=collapsed}` start it collapsed.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            None => Self::None,
            Some(v) if matches!(v.to_lowercase().as_str(), "" | "true" | "collapsed") => {
                Self::Collapsed
            }
            Some(_) => Self::Expanded,
        }
    }

    /// Combine two fold requests: collapsible if either is, collapsed if
    /// either asks for it.
    pub fn merge(self, other: Fold) -> Self {
        match (self, other) {
            (Self::Collapsed, _) | (_, Self::Collapsed) => Self::Collapsed,
            (Self::Expanded, _) | (_, Self::Expanded) => Self::Expanded,
            _ => Self::None,
        }
    }

    pub fn is_collapsible(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, Self::Collapsed)
    }

    /// Convert to string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Expanded => "expanded",
            Self::Collapsed => "collapsed",
        }
    }
}
