//! Orthographic rhyme grouping by word ending.
//!
//! Tokens are grouped when their last three letters match after trailing
//! punctuation is removed and case is folded. Nothing here is phonetic:
//! "night" and "bite" stay apart while "cough" and "dough" end up together.

use std::collections::HashMap;

use tracing::debug;

/// Trailing characters removed before a token is compared
pub const STRIPPED_PUNCTUATION: [char; 4] = [',', '.', '!', '?'];

/// Comparison keys shorter than this (in characters) are left unmarked
pub const MIN_KEY_CHARS: usize = 3;

/// Number of trailing characters that form the grouping key
pub const ENDING_CHARS: usize = 3;

/// CSS class prefix of the emitted spans; the group id is appended
pub const GROUP_CLASS_PREFIX: &str = "rhyme-group-";

/// Ending → group id table built during a single pass.
///
/// Ids start at 1 and are handed out in first-seen order, so the same token
/// sequence always produces the same assignment.
#[derive(Debug, Default, Clone)]
pub struct RhymeGroups {
  ids: HashMap<String, usize>,
}

impl RhymeGroups {
  /// Creates an empty table.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the id of `ending`, assigning the next id if it is new.
  pub fn assign(&mut self, ending: &str) -> usize {
    if let Some(&id) = self.ids.get(ending) {
      return id;
    }
    let id = self.ids.len() + 1;
    self.ids.insert(ending.to_string(), id);
    id
  }

  /// Looks up an ending without assigning.
  #[must_use]
  pub fn get(&self, ending: &str) -> Option<usize> {
    self.ids.get(ending).copied()
  }

  /// Number of distinct endings seen.
  #[must_use]
  pub fn len(&self) -> usize {
    self.ids.len()
  }

  /// True when no ending has been assigned yet.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }
}

/// A whitespace-delimited token and the group it was assigned to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupedToken<'a> {
  /// Token exactly as it appeared in the input
  pub token: &'a str,
  /// Rhyme group id; `None` for tokens too short to compare
  pub group: Option<usize>,
}

/// Lower-cased token with trailing `,` `.` `!` `?` removed.
///
/// Only the end of the token is stripped. Leading or interior marks stay in
/// the key, so `...no` keeps its dots and `U.S.A.` compares as `u.s.a`.
#[must_use]
pub fn comparison_key(token: &str) -> String {
  token.trim_end_matches(&STRIPPED_PUNCTUATION[..]).to_lowercase()
}

/// Last [`ENDING_CHARS`] characters of `key` (the whole key if shorter).
#[must_use]
pub fn ending_of(key: &str) -> &str {
  let start = key.char_indices().rev().nth(ENDING_CHARS - 1).map_or(0, |(idx, _)| idx);
  &key[start..]
}

/// Splits `text` on whitespace and assigns each long-enough token a group.
#[must_use]
pub fn group_tokens(text: &str) -> Vec<GroupedToken<'_>> {
  let mut groups = RhymeGroups::new();

  text
    .split_whitespace()
    .map(|token| {
      let key = comparison_key(token);
      let group = if key.chars().count() < MIN_KEY_CHARS {
        None
      } else {
        Some(groups.assign(ending_of(&key)))
      };
      GroupedToken { token, group }
    })
    .collect()
}

/// Local fallback: wraps every comparable token in a `rhyme-group-<id>` span.
///
/// Tokens are re-joined with single spaces, so line breaks in the input are
/// not carried into the output. Colors are left to the stylesheet.
#[must_use]
pub fn simple_rhyme_detection(text: &str) -> String {
  let grouped = group_tokens(text);

  let html = grouped
    .iter()
    .map(|grouped| match grouped.group {
      Some(id) => format!(r#"<span class="{GROUP_CLASS_PREFIX}{id}">{}</span>"#, grouped.token),
      None => grouped.token.to_string(),
    })
    .collect::<Vec<_>>()
    .join(" ");

  debug!(
    token_count = grouped.len(),
    group_count = grouped.iter().filter_map(|g| g.group).max().unwrap_or(0),
    "fallback rhyme detection finished"
  );

  html
}
