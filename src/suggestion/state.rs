//! Suggestion overlay state, keys and trigger matching.

use serde::Serialize;

use crate::editor::host::{Rect, TextRange};

/// Keys the overlay reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// What an overlay did with an update or key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing for the overlay; the host handles the key.
    Ignored,
    /// Handled, but there was nothing to do (no candidates).
    Unchanged,
    Opened,
    Updated,
    /// Selection moved to the given index.
    Navigated(usize),
    /// A candidate was committed and the overlay closed.
    Committed,
    /// Closed without committing.
    Closed,
}

impl Transition {
    /// Whether the key was consumed and must not reach the host.
    pub fn is_handled(self) -> bool {
        self != Transition::Ignored
    }
}

/// An open overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionState<T> {
    pub query: String,
    pub candidates: Vec<T>,
    /// Always `< candidates.len()` unless there are no candidates.
    pub selected_index: usize,
    /// Caret rectangle the popup is positioned against.
    pub anchor: Option<Rect>,
    /// Trigger character plus query, in document positions.
    pub range: TextRange,
}

impl<T> SuggestionState<T> {
    pub fn selected(&self) -> Option<&T> {
        self.candidates.get(self.selected_index)
    }
}

/// A trigger found before the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    pub query: String,
    pub range: TextRange,
}

/// Looks for an active trigger in the text before the cursor.
///
/// The trigger must start the text block or follow whitespace. The query is
/// everything between the trigger and the cursor and may not contain
/// whitespace unless `allow_spaces` is set.
pub fn find_trigger(
    trigger: char,
    allow_spaces: bool,
    text_before: &str,
    cursor: usize,
) -> Option<TriggerMatch> {
    let at = text_before.rfind(trigger)?;
    let query = &text_before[at + trigger.len_utf8()..];

    if let Some(prev) = text_before[..at].chars().next_back() {
        if !prev.is_whitespace() {
            return None;
        }
    }
    if !allow_spaces && query.chars().any(char::is_whitespace) {
        return None;
    }

    let len = 1 + query.chars().count();
    Some(TriggerMatch {
        query: query.to_string(),
        range: TextRange::new(cursor.checked_sub(len)?, cursor),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_at_block_start() {
        let m = find_trigger('/', false, "/hea", 5).unwrap();
        assert_eq!(m.query, "hea");
        assert_eq!(m.range, TextRange::new(1, 5));
    }

    #[test]
    fn test_trigger_after_space() {
        let m = find_trigger('@', false, "hello @ad", 10).unwrap();
        assert_eq!(m.query, "ad");
        assert_eq!(m.range, TextRange::new(7, 10));

        let m = find_trigger('@', false, "hi @", 4).unwrap();
        assert_eq!(m.query, "");
    }

    #[test]
    fn test_trigger_inside_word() {
        assert_eq!(find_trigger('@', false, "mail@example", 12), None);
        assert_eq!(find_trigger('/', false, "and/or", 6), None);
    }

    #[test]
    fn test_query_with_space() {
        assert_eq!(find_trigger('/', false, "/add ta", 7), None);
        let m = find_trigger('/', true, "/add ta", 7).unwrap();
        assert_eq!(m.query, "add ta");
    }

    #[test]
    fn test_no_trigger() {
        assert_eq!(find_trigger('/', false, "plain text", 10), None);
        assert_eq!(find_trigger('/', false, "", 0), None);
    }

    #[test]
    fn test_multibyte_query() {
        let m = find_trigger('@', false, "é @zoë", 6).unwrap();
        assert_eq!(m.query, "zoë");
        assert_eq!(m.range, TextRange::new(2, 6));
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("ArrowDown"), Key::Down);
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("a"), Key::Other);
        assert!(!Transition::Ignored.is_handled());
        assert!(Transition::Unchanged.is_handled());
    }
}
