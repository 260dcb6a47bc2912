//! Threaded comments module.
//!
//! This module provides:
//! - `model`: Comment, NewComment and FilterMode data types
//! - `tree`: copy-on-write tree operations (reply, resolve, edit, filter, count)
//! - `dialog`: the new-comment dialog request/response controller
//! - `section`: CommentSection, the stateful panel controller
//! - `display`: relative time, initials and reply-depth helpers
//! - `wasm`: WASM bindings for browser usage (JsCommentSection)

pub mod dialog;
pub mod display;
pub mod model;
pub mod section;
pub mod tree;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use dialog::{CommentDialog, DialogOptions, Pending};
pub use model::{Comment, FilterMode, NewComment};
pub use section::{CommentSection, CommentStore, CommentTemplate, SectionOptions};

#[cfg(feature = "wasm")]
pub use wasm::JsCommentSection;
