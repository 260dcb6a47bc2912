//! `@` mentions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::overlay::SuggestionProvider;
use crate::editor::host::{EditorCommand, HostEditor, TextRange};

pub const MENTION_TRIGGER: char = '@';

/// Attributes of a mention node in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MentionNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Markdown for a mention node: the trigger followed by the label, or the
/// id when there is no label.
pub fn render_mention_markdown(node: &MentionNode, trigger: Option<char>) -> String {
    let shown = node.label.as_deref().unwrap_or(&node.id);
    format!("{}{shown}", trigger.unwrap_or(MENTION_TRIGGER))
}

/// Mention suggestions backed by a caller-supplied query function.
pub struct Mentions<F>
where
    F: Fn(&str) -> Vec<String>,
{
    query: F,
}

impl<F> Mentions<F>
where
    F: Fn(&str) -> Vec<String>,
{
    pub fn new(query: F) -> Self {
        Self { query }
    }
}

impl<F> fmt::Debug for Mentions<F>
where
    F: Fn(&str) -> Vec<String>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mentions").finish_non_exhaustive()
    }
}

impl<F> SuggestionProvider for Mentions<F>
where
    F: Fn(&str) -> Vec<String>,
{
    type Item = String;

    fn trigger(&self) -> char {
        MENTION_TRIGGER
    }

    fn items(&self, query: &str) -> Vec<String> {
        (self.query)(query)
    }

    fn commit<H: HostEditor + ?Sized>(&mut self, host: &mut H, range: TextRange, item: &String) {
        host.execute(&EditorCommand::InsertMention {
            range,
            id: item.clone(),
            label: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::editor::host::mock::MockHost;
    use crate::suggestion::overlay::SuggestionOverlay;
    use crate::suggestion::state::{Key, Transition};

    const PEOPLE: &[&str] = &["ada", "alan", "grace"];

    fn people(query: &str) -> Vec<String> {
        PEOPLE
            .iter()
            .filter(|p| p.starts_with(query))
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_mention_commit_inserts_node() {
        let mut host = MockHost::new();
        let mut overlay = SuggestionOverlay::new(Mentions::new(people));

        host.type_text("cc @a");
        assert_eq!(overlay.update(&host), Transition::Opened);
        assert_eq!(overlay.state().unwrap().candidates, vec!["ada", "alan"]);

        overlay.handle_key(&mut host, Key::Down);
        assert_eq!(overlay.handle_key(&mut host, Key::Enter), Transition::Committed);
        assert_eq!(
            host.executed,
            vec![EditorCommand::InsertMention {
                range: TextRange::new(3, 5),
                id: "alan".to_string(),
                label: None,
            }]
        );
        assert_eq!(host.text, "cc @alan ");
    }

    #[test]
    fn test_query_fn_called_per_update() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&calls);
        let mut overlay = SuggestionOverlay::new(Mentions::new(move |q: &str| {
            log.borrow_mut().push(q.to_string());
            Vec::new()
        }));

        let mut host = MockHost::new();
        host.type_text("@");
        overlay.update(&host);
        host.type_text("g");
        overlay.update(&host);
        host.type_text("r");
        overlay.update(&host);

        assert_eq!(*calls.borrow(), vec!["", "g", "gr"]);
    }

    #[test]
    fn test_render_mention_markdown() {
        let node = MentionNode::new("u-42");
        assert_eq!(render_mention_markdown(&node, None), "@u-42");

        let node = node.with_label("Grace");
        assert_eq!(render_mention_markdown(&node, None), "@Grace");
        assert_eq!(render_mention_markdown(&node, Some('+')), "+Grace");
    }

    #[test]
    fn test_mention_node_serde() {
        let node: MentionNode = serde_json::from_str(r#"{"id":"ada"}"#).unwrap();
        assert_eq!(node, MentionNode::new("ada"));
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"id":"ada"}"#);
    }
}
