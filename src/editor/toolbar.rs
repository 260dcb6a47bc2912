//! Toolbar and bubble-menu view models.

use serde::Serialize;
use tracing::debug;

use super::commands::{self, CommandId, Dispatch};
use super::host::{ActiveCheck, EditorCommand, HostEditor};

/// One toolbar button, resolved against the current host state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarItem {
    pub id: CommandId,
    pub title: &'static str,
    pub description: &'static str,
    pub enabled: bool,
    pub active: bool,
}

/// Resolves every command group for rendering.
///
/// Call again after each host transaction; nothing is cached.
pub fn toolbar<H: HostEditor + ?Sized>(host: &H, comments: bool) -> Vec<Vec<ToolbarItem>> {
    commands::command_groups(comments)
        .into_iter()
        .map(|group| {
            group
                .iter()
                .map(|d| ToolbarItem {
                    id: d.id,
                    title: d.title,
                    description: d.description,
                    enabled: commands::is_enabled(host, d.id),
                    active: commands::is_active(host, d.id),
                })
                .collect()
        })
        .collect()
}

const BUBBLE_MARKS: &[&str] = &["bold", "italic", "strike"];
const COMMENT_MARK: &str = "comment";

/// The floating selection menu: bold, italic, strike and optionally comment.
///
/// The menu is a multi-toggle group. The UI reports the full set of toggled
/// values and [`BubbleMenu::apply`] brings the host in line with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BubbleMenu {
    comments: bool,
}

/// What [`BubbleMenu::apply`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BubbleOutcome {
    pub toggled: Vec<&'static str>,
    /// Comment was switched on; open the comment dialog.
    pub request_comment: bool,
}

impl BubbleMenu {
    pub fn new(comments: bool) -> Self {
        Self { comments }
    }

    pub fn values(&self) -> Vec<&'static str> {
        let mut values = BUBBLE_MARKS.to_vec();
        if self.comments {
            values.push(COMMENT_MARK);
        }
        values
    }

    /// Values currently active at the selection.
    pub fn active_values<H: HostEditor + ?Sized>(&self, host: &H) -> Vec<&'static str> {
        self.values()
            .into_iter()
            .filter(|&v| host.is_active(&ActiveCheck::Named(v)))
            .collect()
    }

    /// Toggles each value whose membership in `new_values` differs from the
    /// host state.
    pub fn apply<H: HostEditor + ?Sized>(&self, host: &mut H, new_values: &[&str]) -> BubbleOutcome {
        let mut outcome = BubbleOutcome::default();
        for value in self.values() {
            let wanted = new_values.contains(&value);
            if wanted == host.is_active(&ActiveCheck::Named(value)) {
                continue;
            }
            let id = match value {
                "bold" => CommandId::Bold,
                "italic" => CommandId::Italic,
                "strike" => CommandId::Strikethrough,
                _ => CommandId::Comment,
            };
            if commands::dispatch(host, id) == Dispatch::RequestComment {
                outcome.request_comment = true;
            }
            outcome.toggled.push(value);
        }
        debug!(toggled = ?outcome.toggled, "bubble menu applied");
        outcome
    }
}

/// Markdown-source editing for the toolbar's markdown mode: pushes the
/// textarea contents back into the host document.
pub fn apply_markdown_source<H: HostEditor + ?Sized>(host: &mut H, source: &str) -> bool {
    host.execute(&EditorCommand::SetContent {
        content: source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::host::mock::MockHost;

    #[test]
    fn test_toolbar_shape() {
        let host = MockHost::new();
        let groups = toolbar(&host, false);
        assert_eq!(groups.len(), commands::COMMAND_GROUPS.len());
        assert_eq!(groups[0][0].title, "Undo");
        assert!(groups.iter().flatten().all(|item| item.enabled && !item.active));

        let with_comments = toolbar(&host, true);
        let last = with_comments.last().unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, CommandId::Comment);
    }

    #[test]
    fn test_toolbar_reflects_host() {
        let mut host = MockHost::new();
        host.active.insert(ActiveCheck::Heading(1));
        host.disabled.push(EditorCommand::MergeCells);

        let items: Vec<ToolbarItem> = toolbar(&host, false).into_iter().flatten().collect();
        let h1 = items.iter().find(|i| i.id == CommandId::Heading1).unwrap();
        assert!(h1.active);
        let merge = items.iter().find(|i| i.id == CommandId::MergeCells).unwrap();
        assert!(!merge.enabled);
    }

    #[test]
    fn test_bubble_active_values() {
        let mut host = MockHost::new();
        host.active.insert(ActiveCheck::Named("italic"));
        host.active.insert(ActiveCheck::Named("comment"));

        assert_eq!(BubbleMenu::new(false).active_values(&host), vec!["italic"]);
        assert_eq!(
            BubbleMenu::new(true).active_values(&host),
            vec!["italic", "comment"]
        );
    }

    #[test]
    fn test_bubble_apply_toggles_differences() {
        let mut host = MockHost::new();
        host.active.insert(ActiveCheck::Named("italic"));

        // bold on, italic off, strike untouched
        let outcome = BubbleMenu::new(false).apply(&mut host, &["bold"]);
        assert_eq!(outcome.toggled, vec!["bold", "italic"]);
        assert!(!outcome.request_comment);
        assert!(host.is_active(&ActiveCheck::Named("bold")));
        assert!(!host.is_active(&ActiveCheck::Named("italic")));

        // same state again is a no-op
        let outcome = BubbleMenu::new(false).apply(&mut host, &["bold"]);
        assert!(outcome.toggled.is_empty());
    }

    #[test]
    fn test_bubble_comment_requests_dialog() {
        let mut host = MockHost::new();
        let outcome = BubbleMenu::new(true).apply(&mut host, &["comment"]);
        assert_eq!(outcome.toggled, vec!["comment"]);
        assert!(outcome.request_comment);
        assert!(host.executed.is_empty());
    }

    #[test]
    fn test_markdown_source() {
        let mut host = MockHost::new();
        assert!(apply_markdown_source(&mut host, "# Title"));
        assert_eq!(
            host.executed,
            vec![EditorCommand::SetContent {
                content: "# Title".to_string()
            }]
        );
    }
}
