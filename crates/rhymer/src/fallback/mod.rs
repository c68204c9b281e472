//! fallback module
pub mod suffix_grouping;

/// Re-export
pub use suffix_grouping::{GroupedToken, RhymeGroups, group_tokens, simple_rhyme_detection};
