//! Editorial - framework-independent core of a rich-text editor UI.
//!
//! The document model belongs to a host editing framework. This crate holds
//! the state and rules around it:
//!
//! - **Threaded comments**: an immutable comment tree with reply, resolve,
//!   edit and filter operations, plus the new-comment dialog flow
//! - **Command catalog**: toolbar, bubble menu and slash-command entries
//!   dispatched against any [`editor::HostEditor`]
//! - **Suggestion overlays**: the `/` command and `@` mention popups as a
//!   keyboard-driven state machine
//!
//! # Example
//!
//! ```rust
//! use editorial::{CommentSection, FilterMode, SectionOptions};
//!
//! let mut section = CommentSection::new(SectionOptions::new("Ada"));
//!
//! // Post a top-level comment, then resolve it
//! let id = section.post("Typo in the second paragraph").unwrap();
//! section.toggle_resolved(&id);
//!
//! section.set_filter(FilterMode::Unresolved);
//! assert_eq!(section.total_visible_count(), 0);
//!
//! section.set_filter(FilterMode::All);
//! assert_eq!(section.total_visible_count(), 1);
//! ```

pub mod error;

// Comments module
pub mod comments;

// Editor chrome and host integration
pub mod editor;

// Suggestion overlays
pub mod suggestion;

// Re-exports for convenience
pub use comments::{Comment, CommentDialog, CommentSection, FilterMode, NewComment, Pending, SectionOptions};
pub use editor::{CommandId, Dispatch, EditorCommand, EditorOptions, EditorSurface, HostEditor};
pub use error::{CancelReason, EditorError, EditorResult};
pub use suggestion::{Mentions, SlashCommands, SuggestionOverlay, SuggestionProvider};

#[cfg(feature = "wasm")]
pub use comments::JsCommentSection;
