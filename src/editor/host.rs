//! The host editing surface.
//!
//! The document model, transactions and undo history live in the host rich
//! text framework. This crate only talks to it through [`HostEditor`]:
//! querying active formatting, running commands and reading cursor geometry.

use serde::{Deserialize, Serialize};

/// A screen-space rectangle, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A range of document positions, `from..to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub from: usize,
    pub to: usize,
}

impl TextRange {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// What "is this formatting active at the cursor?" asks the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActiveCheck {
    /// A mark or node by its host name, e.g. `"bold"` or `"bulletList"`.
    Named(&'static str),
    /// A heading of the given level.
    Heading(u8),
    /// Paragraph/heading alignment.
    TextAlign(TextAlign),
}

/// A single command executed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorCommand {
    Focus,
    Undo,
    Redo,
    ToggleBold,
    ToggleItalic,
    ToggleStrike,
    ToggleCode,
    ToggleHighlight,
    ToggleHeading { level: u8 },
    SetTextAlign { align: TextAlign },
    ToggleBulletList,
    ToggleOrderedList,
    ToggleTaskList,
    ToggleBlockquote,
    ToggleCodeBlock,
    /// Extends the selection over the link mark at the cursor.
    ExtendLinkRange,
    SetLink { href: String },
    UnsetLink,
    InsertTable { rows: u32, cols: u32, with_header_row: bool },
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
    SetHorizontalRule,
    UnsetAllMarks,
    /// Inserts raw content at the cursor.
    InsertContent { content: String },
    /// Places the caret at a document position.
    SetTextSelection { position: usize },
    DeleteRange { range: TextRange },
    /// Replaces `range` with a mention node followed by a space.
    InsertMention {
        range: TextRange,
        id: String,
        label: Option<String>,
    },
    /// Marks the current selection as anchored to a comment thread.
    SetComment { id: String },
    /// Replaces the whole document from serialized source (markdown mode).
    SetContent { content: String },
}

/// The external rich-text editing surface.
pub trait HostEditor {
    /// Whether the given mark/node/attribute is active at the selection.
    fn is_active(&self, check: &ActiveCheck) -> bool;

    /// Dry run: whether `command` would apply in the current state.
    fn can_execute(&self, command: &EditorCommand) -> bool;

    /// Runs `command`. Returns true if the document or selection changed.
    fn execute(&mut self, command: &EditorCommand) -> bool;

    /// Document position of the caret.
    fn cursor_position(&self) -> usize;

    /// Text of the current text block from its start up to the caret.
    fn text_before_cursor(&self) -> String;

    /// Screen rectangle of the caret, if the view is mounted.
    fn cursor_rect(&self) -> Option<Rect>;

    /// `href` of the link mark at the cursor.
    fn link_href(&self) -> Option<String> {
        None
    }

    /// Asks the user for a link URL. `None` means the prompt was cancelled.
    fn prompt_link(&mut self, _previous: Option<&str>) -> Option<String> {
        None
    }
}
