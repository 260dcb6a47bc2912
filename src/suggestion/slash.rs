//! `/` slash commands.

use super::overlay::SuggestionProvider;
use crate::editor::commands::{self, CommandDescriptor};
use crate::editor::host::{EditorCommand, HostEditor, TextRange};

/// Offers the command catalog after a `/`, filtered by title.
///
/// The comment command is never offered: comments start from a selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlashCommands;

impl SlashCommands {
    pub fn new() -> Self {
        Self
    }
}

impl SuggestionProvider for SlashCommands {
    type Item = &'static CommandDescriptor;

    fn trigger(&self) -> char {
        '/'
    }

    fn items(&self, query: &str) -> Vec<Self::Item> {
        commands::filter_by_title(query, false)
    }

    fn commit<H: HostEditor + ?Sized>(&mut self, host: &mut H, range: TextRange, item: &Self::Item) {
        host.execute(&EditorCommand::DeleteRange { range });
        commands::dispatch(host, item.id);
    }
}
