//! Request/response controller for the "new comment" dialog.
//!
//! [`CommentDialog::request_new_comment`] opens the dialog and hands back a
//! [`Pending`] that settles exactly once: with the collected [`NewComment`] on
//! confirm, or with [`EditorError::Cancelled`] on cancel, dismiss, or when a
//! newer request replaces it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::NewComment;
use crate::error::{CancelReason, EditorError, EditorResult};

// =============================================================================
// PENDING RESULT
// =============================================================================

/// A result that is delivered later, once the user acts.
///
/// Await it, or poll it without blocking through [`Pending::try_take`].
/// If the settling side is dropped first, it resolves to
/// `Cancelled(CancelReason::Dropped)`.
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<EditorResult<T>>,
    taken: bool,
}

/// The settling half of a [`Pending`].
#[derive(Debug)]
pub(crate) struct Settle<T> {
    tx: oneshot::Sender<EditorResult<T>>,
}

/// Creates a connected settle/pending pair.
pub(crate) fn deferred<T>() -> (Settle<T>, Pending<T>) {
    let (tx, rx) = oneshot::channel();
    (Settle { tx }, Pending { rx, taken: false })
}

impl<T> Settle<T> {
    /// Delivers the result. A receiver that was already dropped is ignored.
    pub(crate) fn settle(self, result: EditorResult<T>) {
        let _ = self.tx.send(result);
    }
}

impl<T> Pending<T> {
    /// Returns the result if it has been delivered, without blocking.
    ///
    /// Yields `Some` at most once.
    pub fn try_take(&mut self) -> Option<EditorResult<T>> {
        if self.taken {
            return None;
        }
        let out = match self.rx.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(EditorError::cancelled(CancelReason::Dropped))),
        };
        if out.is_some() {
            self.taken = true;
        }
        out
    }
}

impl<T> Future for Pending<T> {
    type Output = EditorResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => {
                self.taken = true;
                Poll::Ready(result)
            }
            Poll::Ready(Err(oneshot::Canceled)) => {
                self.taken = true;
                Poll::Ready(Err(EditorError::cancelled(CancelReason::Dropped)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

// =============================================================================
// DIALOG
// =============================================================================

/// Options for a single dialog request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DialogOptions {
    /// Pre-filled author name.
    pub default_author: String,
    /// Whether the author field may be edited.
    #[serde(default)]
    pub author_editable: bool,
}

impl DialogOptions {
    pub fn new(default_author: impl Into<String>) -> Self {
        Self {
            default_author: default_author.into(),
            author_editable: false,
        }
    }

    /// Builder: Allow editing the author field.
    pub fn with_author_editable(mut self, editable: bool) -> Self {
        self.author_editable = editable;
        self
    }
}

/// Modal flow that collects the author and content of a new comment.
///
/// At most one request is open at a time; opening a new one settles the
/// previous one as `Superseded`.
#[derive(Debug, Default)]
pub struct CommentDialog {
    author: String,
    content: String,
    author_editable: bool,
    pending: Option<Settle<NewComment>>,
}

impl CommentDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog and returns the pending result of this request.
    pub fn request_new_comment(&mut self, options: DialogOptions) -> Pending<NewComment> {
        if let Some(previous) = self.pending.take() {
            debug!("comment dialog request superseded");
            previous.settle(Err(EditorError::cancelled(CancelReason::Superseded)));
        }

        let (settle, pending) = deferred();
        self.author = options.default_author;
        self.author_editable = options.author_editable;
        self.content.clear();
        self.pending = Some(settle);
        debug!(author_editable = self.author_editable, "comment dialog opened");
        pending
    }

    /// Returns true while a request is waiting for the user.
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_editable(&self) -> bool {
        self.author_editable
    }

    /// Updates the author field. Returns false (and changes nothing) if the
    /// field is read-only for the current request.
    pub fn set_author(&mut self, author: impl Into<String>) -> bool {
        if !self.author_editable {
            return false;
        }
        self.author = author.into();
        true
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Whether "Save" is enabled: both fields are non-empty after trimming.
    pub fn can_confirm(&self) -> bool {
        self.is_open() && !self.author.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Settles the open request with the current form values.
    ///
    /// With an empty field nothing is settled and the dialog stays open.
    pub fn confirm(&mut self) -> EditorResult<()> {
        if !self.is_open() {
            return Err(EditorError::DialogNotOpen);
        }
        if self.author.trim().is_empty() {
            return Err(EditorError::EmptyField("author"));
        }
        if self.content.trim().is_empty() {
            return Err(EditorError::EmptyField("content"));
        }

        let result = NewComment::new(self.author.trim(), self.content.trim());
        self.settle(Ok(result));
        debug!("comment dialog confirmed");
        Ok(())
    }

    /// Explicit "Cancel": settles the open request as cancelled.
    pub fn cancel(&mut self) -> EditorResult<()> {
        self.close_with(CancelReason::Explicit)
    }

    /// Closed without an explicit action: settles the open request as dismissed.
    pub fn dismiss(&mut self) -> EditorResult<()> {
        self.close_with(CancelReason::Dismissed)
    }

    fn close_with(&mut self, reason: CancelReason) -> EditorResult<()> {
        if !self.is_open() {
            return Err(EditorError::DialogNotOpen);
        }
        self.settle(Err(EditorError::cancelled(reason)));
        debug!(%reason, "comment dialog closed");
        Ok(())
    }

    fn settle(&mut self, result: EditorResult<NewComment>) {
        if let Some(pending) = self.pending.take() {
            pending.settle(result);
        }
        self.author.clear();
        self.content.clear();
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn test_confirm_resolves() {
        let mut dialog = CommentDialog::new();
        let pending = dialog.request_new_comment(DialogOptions::new("Ada"));
        assert!(dialog.is_open());
        assert_eq!(dialog.author(), "Ada");

        dialog.set_content("  looks good  ");
        assert!(dialog.can_confirm());
        dialog.confirm().unwrap();
        assert!(!dialog.is_open());

        let result = block_on(pending).unwrap();
        assert_eq!(result, NewComment::new("Ada", "looks good"));
    }

    #[test]
    fn test_cancel_rejects() {
        let mut dialog = CommentDialog::new();
        let pending =
            dialog.request_new_comment(DialogOptions::new("X").with_author_editable(false));
        dialog.cancel().unwrap();

        let err = block_on(pending).unwrap_err();
        assert_eq!(err, EditorError::Cancelled(CancelReason::Explicit));
        assert!(err.is_cancellation());
    }

    #[test]
    fn test_dismiss_rejects() {
        let mut dialog = CommentDialog::new();
        let mut pending = dialog.request_new_comment(DialogOptions::new("X"));
        assert!(pending.try_take().is_none());
        dialog.dismiss().unwrap();
        assert_eq!(
            pending.try_take(),
            Some(Err(EditorError::Cancelled(CancelReason::Dismissed)))
        );
        assert_eq!(pending.try_take(), None);
    }

    #[test]
    fn test_second_request_supersedes_first() {
        let mut dialog = CommentDialog::new();
        let first = dialog.request_new_comment(DialogOptions::new("A"));
        let second = dialog.request_new_comment(DialogOptions::new("B"));

        assert_eq!(
            block_on(first),
            Err(EditorError::Cancelled(CancelReason::Superseded))
        );

        dialog.set_content("second wins");
        dialog.confirm().unwrap();
        assert_eq!(block_on(second).unwrap().author, "B");
    }

    #[test]
    fn test_empty_fields_block_confirm() {
        let mut dialog = CommentDialog::new();
        let mut pending = dialog.request_new_comment(DialogOptions::new("Ada"));

        assert!(!dialog.can_confirm());
        assert_eq!(dialog.confirm(), Err(EditorError::EmptyField("content")));
        dialog.set_content("   ");
        assert_eq!(dialog.confirm(), Err(EditorError::EmptyField("content")));
        assert!(dialog.is_open());
        assert!(pending.try_take().is_none());
    }

    #[test]
    fn test_author_editable_flag() {
        let mut dialog = CommentDialog::new();
        let _locked = dialog.request_new_comment(DialogOptions::new("Ada"));
        assert!(!dialog.set_author("Mallory"));
        assert_eq!(dialog.author(), "Ada");

        let pending =
            dialog.request_new_comment(DialogOptions::new("").with_author_editable(true));
        dialog.set_content("hello");
        assert_eq!(dialog.confirm(), Err(EditorError::EmptyField("author")));
        assert!(dialog.set_author("Grace"));
        dialog.confirm().unwrap();
        assert_eq!(block_on(pending).unwrap().author, "Grace");
    }

    #[test]
    fn test_actions_without_request() {
        let mut dialog = CommentDialog::new();
        assert_eq!(dialog.confirm(), Err(EditorError::DialogNotOpen));
        assert_eq!(dialog.cancel(), Err(EditorError::DialogNotOpen));
        assert_eq!(dialog.dismiss(), Err(EditorError::DialogNotOpen));
    }

    #[test]
    fn test_dropped_controller_settles_pending() {
        let mut dialog = CommentDialog::new();
        let pending = dialog.request_new_comment(DialogOptions::new("Ada"));
        drop(dialog);
        assert_eq!(
            block_on(pending),
            Err(EditorError::Cancelled(CancelReason::Dropped))
        );
    }
}
