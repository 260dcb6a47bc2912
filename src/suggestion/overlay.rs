//! The generic suggestion overlay state machine.

use tracing::{debug, trace};

use super::state::{find_trigger, Key, SuggestionState, Transition};
use crate::editor::host::{HostEditor, TextRange};

/// Supplies candidates for a trigger character and applies the chosen one.
pub trait SuggestionProvider {
    type Item: Clone + PartialEq;

    fn trigger(&self) -> char;

    fn allow_spaces(&self) -> bool {
        false
    }

    /// Candidates for `query`. Called on every update while open.
    fn items(&self, query: &str) -> Vec<Self::Item>;

    /// Applies `item` in place of the trigger text at `range`.
    fn commit<H: HostEditor + ?Sized>(&mut self, host: &mut H, range: TextRange, item: &Self::Item);
}

/// A popup list driven by a trigger character typed in the host.
///
/// Closed until [`SuggestionOverlay::update`] sees a trigger before the
/// cursor. While open it owns Up/Down/Enter/Escape.
#[derive(Debug)]
pub struct SuggestionOverlay<P: SuggestionProvider> {
    provider: P,
    state: Option<SuggestionState<P::Item>>,
    /// Start of the trigger span closed with Escape. Stays closed until the
    /// cursor leaves that span.
    dismissed_at: Option<usize>,
}

impl<P: SuggestionProvider> SuggestionOverlay<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: None,
            dismissed_at: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&SuggestionState<P::Item>> {
        self.state.as_ref()
    }

    /// Re-reads the host after a document or selection change.
    pub fn update<H: HostEditor + ?Sized>(&mut self, host: &H) -> Transition {
        let found = find_trigger(
            self.provider.trigger(),
            self.provider.allow_spaces(),
            &host.text_before_cursor(),
            host.cursor_position(),
        );

        let Some(found) = found else {
            self.dismissed_at = None;
            return match self.state.take() {
                Some(_) => {
                    debug!(trigger = %self.provider.trigger(), "suggestion closed, trigger left");
                    Transition::Closed
                }
                None => Transition::Ignored,
            };
        };

        if self.state.is_none() && self.dismissed_at == Some(found.range.from) {
            trace!(query = %found.query, "suggestion dismissed for this trigger");
            return Transition::Ignored;
        }
        self.dismissed_at = None;

        let candidates = self.provider.items(&found.query);
        let anchor = host.cursor_rect();

        if let Some(state) = self.state.as_mut() {
            if state.candidates != candidates {
                state.selected_index = 0;
            }
            state.query = found.query;
            state.candidates = candidates;
            state.range = found.range;
            state.anchor = anchor;
            trace!(query = %state.query, count = state.candidates.len(), "suggestion updated");
            return Transition::Updated;
        }

        debug!(
            trigger = %self.provider.trigger(),
            query = %found.query,
            count = candidates.len(),
            "suggestion opened"
        );
        self.state = Some(SuggestionState {
            query: found.query,
            candidates,
            selected_index: 0,
            anchor,
            range: found.range,
        });
        Transition::Opened
    }

    /// Handles a key press. Returns [`Transition::Ignored`] for keys the
    /// host should process.
    pub fn handle_key<H: HostEditor + ?Sized>(&mut self, host: &mut H, key: Key) -> Transition {
        let Some(state) = self.state.as_mut() else {
            return Transition::Ignored;
        };

        let n = state.candidates.len();
        match key {
            Key::Down | Key::Up if n == 0 => Transition::Unchanged,
            Key::Down => {
                state.selected_index = (state.selected_index + 1) % n;
                Transition::Navigated(state.selected_index)
            }
            Key::Up => {
                state.selected_index = (state.selected_index + n - 1) % n;
                Transition::Navigated(state.selected_index)
            }
            Key::Enter => {
                let index = state.selected_index;
                self.select(host, index)
            }
            Key::Escape => {
                self.close();
                Transition::Closed
            }
            Key::Other => Transition::Ignored,
        }
    }

    /// Commits the candidate at `index`, e.g. after a click.
    ///
    /// Out of range (including an empty list) is a no-op and the overlay
    /// stays open.
    pub fn select<H: HostEditor + ?Sized>(&mut self, host: &mut H, index: usize) -> Transition {
        let Some(state) = self.state.take() else {
            return Transition::Ignored;
        };
        if index >= state.candidates.len() {
            trace!(index, "nothing to commit");
            self.state = Some(state);
            return Transition::Unchanged;
        }

        debug!(trigger = %self.provider.trigger(), query = %state.query, index, "suggestion committed");
        self.provider
            .commit(host, state.range, &state.candidates[index]);
        Transition::Committed
    }

    /// Closes without committing. Returns whether it was open.
    ///
    /// The same trigger does not reopen the overlay. A trigger typed
    /// after the cursor has left it does.
    pub fn close(&mut self) -> bool {
        match self.state.take() {
            Some(state) => {
                debug!(trigger = %self.provider.trigger(), "suggestion dismissed");
                self.dismissed_at = Some(state.range.from);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::host::mock::MockHost;
    use crate::editor::host::EditorCommand;

    /// Fixed word list, committing by inserting the word.
    #[derive(Debug)]
    struct Words(Vec<&'static str>);

    impl SuggestionProvider for Words {
        type Item = &'static str;

        fn trigger(&self) -> char {
            '#'
        }

        fn items(&self, query: &str) -> Vec<&'static str> {
            self.0
                .iter()
                .copied()
                .filter(|w| w.starts_with(query))
                .collect()
        }

        fn commit<H: HostEditor + ?Sized>(&mut self, host: &mut H, range: TextRange, item: &&'static str) {
            host.execute(&EditorCommand::DeleteRange { range });
            host.execute(&EditorCommand::InsertContent {
                content: item.to_string(),
            });
        }
    }

    fn overlay() -> SuggestionOverlay<Words> {
        SuggestionOverlay::new(Words(vec!["alpha", "beta", "gamma"]))
    }

    fn open(host: &mut MockHost, overlay: &mut SuggestionOverlay<Words>) {
        host.type_text("#");
        assert_eq!(overlay.update(host), Transition::Opened);
    }

    #[test]
    fn test_open_reads_candidates_and_anchor() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        assert_eq!(overlay.update(&host), Transition::Ignored);

        open(&mut host, &mut overlay);
        let state = overlay.state().unwrap();
        assert_eq!(state.candidates, vec!["alpha", "beta", "gamma"]);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.anchor, host.cursor_rect());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        open(&mut host, &mut overlay);

        assert_eq!(overlay.handle_key(&mut host, Key::Down), Transition::Navigated(1));
        assert_eq!(overlay.handle_key(&mut host, Key::Down), Transition::Navigated(2));
        assert_eq!(overlay.handle_key(&mut host, Key::Down), Transition::Navigated(0));
        assert_eq!(overlay.handle_key(&mut host, Key::Up), Transition::Navigated(2));
        assert_eq!(overlay.handle_key(&mut host, Key::Up), Transition::Navigated(1));
    }

    #[test]
    fn test_index_resets_when_candidates_change() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        open(&mut host, &mut overlay);
        overlay.handle_key(&mut host, Key::Down);
        overlay.handle_key(&mut host, Key::Down);

        // same candidates keep the selection
        host.type_text("");
        assert_eq!(overlay.update(&host), Transition::Updated);
        assert_eq!(overlay.state().unwrap().selected_index, 2);

        host.type_text("g");
        assert_eq!(overlay.update(&host), Transition::Updated);
        let state = overlay.state().unwrap();
        assert_eq!(state.query, "g");
        assert_eq!(state.candidates, vec!["gamma"]);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.anchor, host.cursor_rect());
    }

    #[test]
    fn test_enter_commits_and_closes() {
        let mut host = MockHost::new();
        host.type_text("see ");
        let mut overlay = overlay();
        open(&mut host, &mut overlay);
        host.type_text("b");
        overlay.update(&host);

        assert_eq!(overlay.handle_key(&mut host, Key::Enter), Transition::Committed);
        assert!(!overlay.is_open());
        assert_eq!(
            host.executed,
            vec![
                EditorCommand::DeleteRange {
                    range: TextRange::new(4, 6)
                },
                EditorCommand::InsertContent {
                    content: "beta".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_enter_with_no_candidates() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        open(&mut host, &mut overlay);
        host.type_text("zzz");
        overlay.update(&host);
        assert!(overlay.state().unwrap().candidates.is_empty());

        assert_eq!(overlay.handle_key(&mut host, Key::Enter), Transition::Unchanged);
        assert_eq!(overlay.handle_key(&mut host, Key::Down), Transition::Unchanged);
        assert!(overlay.is_open());
        assert!(host.executed.is_empty());
    }

    #[test]
    fn test_escape_closes_without_commit() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        open(&mut host, &mut overlay);

        assert_eq!(overlay.handle_key(&mut host, Key::Escape), Transition::Closed);
        assert!(!overlay.is_open());
        assert!(host.executed.is_empty());
        assert_eq!(overlay.handle_key(&mut host, Key::Enter), Transition::Ignored);
    }

    #[test]
    fn test_escape_sticks_until_trigger_left() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        open(&mut host, &mut overlay);
        assert_eq!(overlay.handle_key(&mut host, Key::Escape), Transition::Closed);

        // still inside the dismissed trigger span
        host.type_text("b");
        assert_eq!(overlay.update(&host), Transition::Ignored);
        assert!(!overlay.is_open());
        assert_eq!(overlay.handle_key(&mut host, Key::Enter), Transition::Ignored);

        host.backspace(2);
        assert_eq!(overlay.update(&host), Transition::Ignored);
        open(&mut host, &mut overlay);
        assert_eq!(overlay.state().unwrap().range, TextRange::new(0, 1));
    }

    #[test]
    fn test_escape_does_not_block_a_new_trigger() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        open(&mut host, &mut overlay);
        overlay.handle_key(&mut host, Key::Escape);

        host.type_text("a #");
        assert_eq!(overlay.update(&host), Transition::Opened);
        assert_eq!(overlay.state().unwrap().range, TextRange::new(3, 4));
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        assert_eq!(overlay.handle_key(&mut host, Key::Down), Transition::Ignored);
        open(&mut host, &mut overlay);
        assert_eq!(overlay.handle_key(&mut host, Key::Other), Transition::Ignored);
        assert!(overlay.is_open());
    }

    #[test]
    fn test_leaving_trigger_context_closes() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        open(&mut host, &mut overlay);

        host.backspace(1);
        assert_eq!(overlay.update(&host), Transition::Closed);
        assert!(host.executed.is_empty());

        open(&mut host, &mut overlay);
        host.type_text("al pha");
        assert_eq!(overlay.update(&host), Transition::Closed);
    }

    #[test]
    fn test_click_select() {
        let mut host = MockHost::new();
        let mut overlay = overlay();
        open(&mut host, &mut overlay);

        assert_eq!(overlay.select(&mut host, 7), Transition::Unchanged);
        assert!(overlay.is_open());
        assert_eq!(overlay.select(&mut host, 2), Transition::Committed);
        assert_eq!(
            host.executed.last(),
            Some(&EditorCommand::InsertContent {
                content: "gamma".to_string()
            })
        );
        assert!(!overlay.close());
    }
}
