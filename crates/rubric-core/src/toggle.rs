/*
 * toggle.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Names shared with the page scripts that toggle transformed markup.
 */

//! Names shared with the page scripts that toggle transformed markup.
//!
//! The transforms only emit classes and data attributes; showing, hiding
//! and folding happens in the browser. A site build emits these constants
//! into its scripts so that both sides agree on the names.

/// Storage key: weakened text is hidden.
pub const WEAKENED_INVISIBLE_KEY: &str = "weakenedInvisible";

/// Storage key: ruby base text and reading are swapped.
pub const RUBY_SWAPPED_KEY: &str = "ruby-swapped";

/// Storage key: ruby readings are hidden.
pub const RUBY_HIDDEN_KEY: &str = "ruby-hidden";

/// Marks a callout that can be folded.
pub const COLLAPSIBLE_CLASS: &str = "is-collapsible";

/// Marks a folded callout.
pub const COLLAPSED_CLASS: &str = "is-collapsed";

/// Every storage key, for emitting into scripts.
pub const STORAGE_KEYS: &[&str] = &[WEAKENED_INVISIBLE_KEY, RUBY_SWAPPED_KEY, RUBY_HIDDEN_KEY];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct() {
        assert_eq!(STORAGE_KEYS.len(), 3);
        assert!(!STORAGE_KEYS[1..].contains(&STORAGE_KEYS[0]));
        assert_ne!(RUBY_SWAPPED_KEY, RUBY_HIDDEN_KEY);
    }
}
