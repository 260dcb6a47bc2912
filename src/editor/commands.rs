//! The editor command catalog.
//!
//! Every toolbar button and slash-command entry is a [`CommandDescriptor`]
//! in a static group. Behaviour lives in one place, [`dispatch`], which maps
//! a [`CommandId`] onto host commands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::host::{ActiveCheck, EditorCommand, HostEditor, TextAlign};
use crate::comments::{CommentSection, CommentStore};
use crate::error::{EditorError, EditorResult};

/// Content inserted by the Mathematics command: an empty inline formula.
pub const MATH_PLACEHOLDER: &str = "$\\\\\\\\$";

const TABLE_ROWS: u32 = 3;
const TABLE_COLS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandId {
    Undo,
    Redo,
    Bold,
    Italic,
    Strikethrough,
    InlineCode,
    Highlight,
    Heading1,
    Heading2,
    Heading3,
    AlignLeft,
    AlignCenter,
    AlignRight,
    Justify,
    BulletList,
    NumberedList,
    TaskList,
    Blockquote,
    CodeBlock,
    Mathematics,
    AddLink,
    RemoveLink,
    AddTable,
    AddColumnBefore,
    AddColumnAfter,
    AddRowBefore,
    AddRowAfter,
    DeleteColumn,
    DeleteRow,
    DeleteTable,
    ToggleHeaderColumn,
    ToggleHeaderRow,
    MergeCells,
    SplitCell,
    HorizontalRule,
    ClearFormatting,
    Comment,
}

/// A catalog entry. Display data plus the optional "is active" query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub id: CommandId,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub active: Option<ActiveCheck>,
}

impl CommandDescriptor {
    const fn new(id: CommandId, title: &'static str, description: &'static str) -> Self {
        Self {
            id,
            title,
            description,
            active: None,
        }
    }

    const fn active(self, check: ActiveCheck) -> Self {
        Self {
            active: Some(check),
            ..self
        }
    }
}

use CommandId as C;

const HISTORY: &[CommandDescriptor] = &[
    CommandDescriptor::new(C::Undo, "Undo", "Undo last action"),
    CommandDescriptor::new(C::Redo, "Redo", "Redo last action"),
];

const MARKS: &[CommandDescriptor] = &[
    CommandDescriptor::new(C::Bold, "Bold", "Toggle bold").active(ActiveCheck::Named("bold")),
    CommandDescriptor::new(C::Italic, "Italic", "Toggle italic")
        .active(ActiveCheck::Named("italic")),
    CommandDescriptor::new(C::Strikethrough, "Strikethrough", "Toggle strikethrough")
        .active(ActiveCheck::Named("strike")),
    CommandDescriptor::new(C::InlineCode, "Inline Code", "Toggle inline code")
        .active(ActiveCheck::Named("code")),
    CommandDescriptor::new(C::Highlight, "Highlight", "Toggle highlight")
        .active(ActiveCheck::Named("highlight")),
];

const HEADINGS: &[CommandDescriptor] = &[
    CommandDescriptor::new(C::Heading1, "Heading 1", "Toggle heading level 1")
        .active(ActiveCheck::Heading(1)),
    CommandDescriptor::new(C::Heading2, "Heading 2", "Toggle heading level 2")
        .active(ActiveCheck::Heading(2)),
    CommandDescriptor::new(C::Heading3, "Heading 3", "Toggle heading level 3")
        .active(ActiveCheck::Heading(3)),
];

const ALIGNMENT: &[CommandDescriptor] = &[
    CommandDescriptor::new(C::AlignLeft, "Align Left", "Align text left")
        .active(ActiveCheck::TextAlign(TextAlign::Left)),
    CommandDescriptor::new(C::AlignCenter, "Align Center", "Align text center")
        .active(ActiveCheck::TextAlign(TextAlign::Center)),
    CommandDescriptor::new(C::AlignRight, "Align Right", "Align text right")
        .active(ActiveCheck::TextAlign(TextAlign::Right)),
    CommandDescriptor::new(C::Justify, "Justify", "Justify text")
        .active(ActiveCheck::TextAlign(TextAlign::Justify)),
];

const LISTS: &[CommandDescriptor] = &[
    CommandDescriptor::new(C::BulletList, "Bullet List", "Toggle bullet list")
        .active(ActiveCheck::Named("bulletList")),
    CommandDescriptor::new(C::NumberedList, "Numbered List", "Toggle numbered list")
        .active(ActiveCheck::Named("orderedList")),
    CommandDescriptor::new(C::TaskList, "Task List", "Toggle task list")
        .active(ActiveCheck::Named("taskList")),
];

const BLOCKS: &[CommandDescriptor] = &[
    CommandDescriptor::new(C::Blockquote, "Blockquote", "Toggle blockquote")
        .active(ActiveCheck::Named("blockquote")),
    CommandDescriptor::new(C::CodeBlock, "Code Block", "Toggle code block")
        .active(ActiveCheck::Named("codeBlock")),
    CommandDescriptor::new(C::Mathematics, "Mathematics", "Insert mathematics block")
        .active(ActiveCheck::Named("mathematics")),
];

const LINKS: &[CommandDescriptor] = &[
    CommandDescriptor::new(C::AddLink, "Add Link", "Add or edit link")
        .active(ActiveCheck::Named("link")),
    CommandDescriptor::new(C::RemoveLink, "Remove Link", "Remove link"),
];

const TABLES: &[CommandDescriptor] = &[
    CommandDescriptor::new(C::AddTable, "Add Table", "Insert table"),
    CommandDescriptor::new(C::AddColumnBefore, "Add Column Before", "Add column before"),
    CommandDescriptor::new(C::AddColumnAfter, "Add Column After", "Add column after"),
    CommandDescriptor::new(C::AddRowBefore, "Add Row Before", "Add row before"),
    CommandDescriptor::new(C::AddRowAfter, "Add Row After", "Add row after"),
    CommandDescriptor::new(C::DeleteColumn, "Delete Column", "Delete column"),
    CommandDescriptor::new(C::DeleteRow, "Delete Row", "Delete row"),
    CommandDescriptor::new(C::DeleteTable, "Delete Table", "Delete table"),
    CommandDescriptor::new(C::ToggleHeaderColumn, "Toggle Header Column", "Toggle header column"),
    CommandDescriptor::new(C::ToggleHeaderRow, "Toggle Header Row", "Toggle header row"),
    CommandDescriptor::new(C::MergeCells, "Merge Cells", "Merge selected table cells"),
    CommandDescriptor::new(C::SplitCell, "Split Cell", "Split selected table cell"),
];

const RULES: &[CommandDescriptor] = &[CommandDescriptor::new(
    C::HorizontalRule,
    "Horizontal Rule",
    "Insert horizontal rule",
)];

const CLEAR: &[CommandDescriptor] = &[CommandDescriptor::new(
    C::ClearFormatting,
    "Clear Formatting",
    "Clear all formatting",
)];

const COMMENT: &[CommandDescriptor] = &[CommandDescriptor::new(C::Comment, "Comment", "Comment")];

/// The built-in command groups, in toolbar order.
pub static COMMAND_GROUPS: &[&[CommandDescriptor]] = &[
    HISTORY, MARKS, HEADINGS, ALIGNMENT, LISTS, BLOCKS, LINKS, TABLES, RULES, CLEAR,
];

/// The command groups shown for an editor, with the comment group appended
/// when comments are enabled.
pub fn command_groups(comments: bool) -> Vec<&'static [CommandDescriptor]> {
    let mut groups = COMMAND_GROUPS.to_vec();
    if comments {
        groups.push(COMMENT);
    }
    groups
}

/// All commands, flattened in toolbar order.
pub fn all_commands(comments: bool) -> impl Iterator<Item = &'static CommandDescriptor> {
    command_groups(comments).into_iter().flatten()
}

pub fn descriptor(id: CommandId) -> Option<&'static CommandDescriptor> {
    all_commands(true).find(|d| d.id == id)
}

/// Commands whose title contains `query`, ignoring case.
pub fn filter_by_title(query: &str, comments: bool) -> Vec<&'static CommandDescriptor> {
    let query = query.to_lowercase();
    all_commands(comments)
        .filter(|d| d.title.to_lowercase().contains(&query))
        .collect()
}

/// Looks a command up by its exact title, ignoring case.
pub fn find_by_title(title: &str) -> EditorResult<CommandId> {
    all_commands(true)
        .find(|d| d.title.eq_ignore_ascii_case(title))
        .map(|d| d.id)
        .ok_or_else(|| EditorError::unknown_command(title))
}

/// Host commands a catalog entry runs, in order.
///
/// Link editing and comments need more than a fixed sequence and are handled
/// in [`dispatch`]; here they yield the command that decides enablement.
pub fn host_commands(id: CommandId) -> Vec<EditorCommand> {
    use EditorCommand as E;

    let single = match id {
        C::Undo => E::Undo,
        C::Redo => E::Redo,
        C::Bold => E::ToggleBold,
        C::Italic => E::ToggleItalic,
        C::Strikethrough => E::ToggleStrike,
        C::InlineCode => E::ToggleCode,
        C::Highlight => E::ToggleHighlight,
        C::Heading1 => E::ToggleHeading { level: 1 },
        C::Heading2 => E::ToggleHeading { level: 2 },
        C::Heading3 => E::ToggleHeading { level: 3 },
        C::AlignLeft => E::SetTextAlign {
            align: TextAlign::Left,
        },
        C::AlignCenter => E::SetTextAlign {
            align: TextAlign::Center,
        },
        C::AlignRight => E::SetTextAlign {
            align: TextAlign::Right,
        },
        C::Justify => E::SetTextAlign {
            align: TextAlign::Justify,
        },
        C::BulletList => E::ToggleBulletList,
        C::NumberedList => E::ToggleOrderedList,
        C::TaskList => E::ToggleTaskList,
        C::Blockquote => E::ToggleBlockquote,
        C::CodeBlock => E::ToggleCodeBlock,
        C::Mathematics => E::InsertContent {
            content: MATH_PLACEHOLDER.to_string(),
        },
        C::AddLink => E::ExtendLinkRange,
        C::RemoveLink => E::UnsetLink,
        C::AddTable => E::InsertTable {
            rows: TABLE_ROWS,
            cols: TABLE_COLS,
            with_header_row: true,
        },
        C::AddColumnBefore => E::AddColumnBefore,
        C::AddColumnAfter => E::AddColumnAfter,
        C::AddRowBefore => E::AddRowBefore,
        C::AddRowAfter => E::AddRowAfter,
        C::DeleteColumn => E::DeleteColumn,
        C::DeleteRow => E::DeleteRow,
        C::DeleteTable => E::DeleteTable,
        C::ToggleHeaderColumn => E::ToggleHeaderColumn,
        C::ToggleHeaderRow => E::ToggleHeaderRow,
        C::MergeCells => E::MergeCells,
        C::SplitCell => E::SplitCell,
        C::HorizontalRule => E::SetHorizontalRule,
        C::ClearFormatting => E::UnsetAllMarks,
        C::Comment => return Vec::new(),
    };
    vec![E::Focus, single]
}

/// Outcome of [`dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The command ran on the host. `changed` is the host's report.
    Executed { changed: bool },
    /// The user asked to comment on the selection. The embedding layer opens
    /// the comment dialog and calls [`anchor_comment`] with the new id.
    RequestComment,
}

/// Whether the command can run in the current host state.
pub fn is_enabled<H: HostEditor + ?Sized>(host: &H, id: CommandId) -> bool {
    host_commands(id)
        .iter()
        .filter(|c| **c != EditorCommand::Focus)
        .all(|c| host.can_execute(c))
}

/// Whether the command's formatting is active at the selection.
pub fn is_active<H: HostEditor + ?Sized>(host: &H, id: CommandId) -> bool {
    descriptor(id)
        .and_then(|d| d.active)
        .is_some_and(|check| host.is_active(&check))
}

/// Runs a catalog command on the host.
pub fn dispatch<H: HostEditor + ?Sized>(host: &mut H, id: CommandId) -> Dispatch {
    debug!(command = ?id, "dispatch");
    let changed = match id {
        C::Comment => return Dispatch::RequestComment,
        C::AddLink => edit_link(host),
        C::Mathematics => insert_math(host),
        _ => run_all(host, &host_commands(id)),
    };
    Dispatch::Executed { changed }
}

fn run_all<H: HostEditor + ?Sized>(host: &mut H, commands: &[EditorCommand]) -> bool {
    commands
        .iter()
        .fold(false, |changed, c| host.execute(c) || changed)
}

fn edit_link<H: HostEditor + ?Sized>(host: &mut H) -> bool {
    let previous = host.link_href();
    let Some(url) = host.prompt_link(previous.as_deref()) else {
        return host.execute(&EditorCommand::Focus);
    };

    let apply = if url.is_empty() {
        EditorCommand::UnsetLink
    } else {
        EditorCommand::SetLink { href: url }
    };
    run_all(
        host,
        &[EditorCommand::Focus, EditorCommand::ExtendLinkRange, apply],
    )
}

fn insert_math<H: HostEditor + ?Sized>(host: &mut H) -> bool {
    let changed = run_all(host, &host_commands(C::Mathematics));
    // Step inside the `$...$` delimiters.
    if let Some(position) = host.cursor_position().checked_sub(1) {
        host.execute(&EditorCommand::SetTextSelection { position });
        host.execute(&EditorCommand::Focus);
    }
    changed
}

/// Anchors the current selection to comment `id` and makes it the active
/// comment in `section`. Called once the dialog opened for
/// [`Dispatch::RequestComment`] has produced a comment.
pub fn anchor_comment<H, S>(host: &mut H, section: &mut CommentSection<S>, id: &str) -> bool
where
    H: HostEditor + ?Sized,
    S: CommentStore,
{
    let anchored = host.execute(&EditorCommand::SetComment { id: id.to_string() });
    section.set_active(id);
    anchored
}
