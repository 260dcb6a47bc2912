//! Data models for threaded comments.
//!
//! A comment thread is a plain value tree: every mutation in
//! [`tree`](super::tree) produces a new tree, so snapshots can be compared
//! with `==` and handed to a renderer as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EditorError;

// =============================================================================
// COMMENT
// =============================================================================

/// A single comment and its replies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier across the whole tree.
    pub id: String,

    /// Display name of the author.
    pub author: String,

    /// Creation time in unix milliseconds.
    pub created_at: i64,

    /// Free text body.
    pub content: String,

    /// Whether the discussion is closed. Independent per node.
    #[serde(default)]
    pub resolved: bool,

    /// Replies in display order.
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Creates a comment with an explicit id, stamped with the current time.
    pub fn new(id: impl Into<String>, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            created_at: now_ms(),
            content: content.into(),
            resolved: false,
            replies: Vec::new(),
        }
    }

    /// Creates a new leaf comment with a fresh `comment-<uuid>` id.
    pub fn create(author: &str, content: &str) -> Self {
        Self::new(format!("comment-{}", Uuid::new_v4()), author, content)
    }

    /// Builder: Set creation time.
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builder: Set resolved flag.
    pub fn with_resolved(mut self, resolved: bool) -> Self {
        self.resolved = resolved;
        self
    }

    /// Builder: Append a reply.
    pub fn with_reply(mut self, reply: Comment) -> Self {
        self.replies.push(reply);
        self
    }

    /// Returns true if this comment has no replies.
    pub fn is_leaf(&self) -> bool {
        self.replies.is_empty()
    }
}

/// Current wall-clock time in unix milliseconds.
pub fn now_ms() -> i64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

// =============================================================================
// NEW COMMENT (dialog result)
// =============================================================================

/// Author and content collected by the comment dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub content: String,
}

impl NewComment {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}

// =============================================================================
// FILTER MODE
// =============================================================================

/// Which comments a section displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Resolved,
    Unresolved,
}

impl FilterMode {
    /// The filter predicate for a single node (replies are not considered).
    pub fn matches(self, comment: &Comment) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Resolved => comment.resolved,
            FilterMode::Unresolved => !comment.resolved,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Resolved => "resolved",
            FilterMode::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "resolved" => Ok(FilterMode::Resolved),
            "unresolved" => Ok(FilterMode::Unresolved),
            other => Err(EditorError::unknown_filter(other)),
        }
    }
}
