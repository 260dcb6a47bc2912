//! Comment section controller.
//!
//! `CommentSection` ties together the comment tree, the active filter, the
//! selected comment and the new-comment dialog. It works on any
//! [`CommentStore`]: a plain `Vec<Comment>` when the section owns the tree
//! ("uncontrolled"), or an `Rc<RefCell<Vec<Comment>>>` shared with the
//! embedding application ("controlled").

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dialog::{deferred, CommentDialog, DialogOptions, Pending, Settle};
use super::model::{Comment, FilterMode, NewComment};
use super::tree;
use crate::error::{CancelReason, EditorError, EditorResult};

// =============================================================================
// STORE
// =============================================================================

/// Where the canonical comment tree lives.
///
/// Stores are only ever given whole new trees; they never see partial edits.
pub trait CommentStore {
    /// Runs `f` against the current roots.
    fn with_comments<R>(&self, f: impl FnOnce(&[Comment]) -> R) -> R;

    /// Replaces the current roots.
    fn replace(&mut self, comments: Vec<Comment>);

    /// Returns an owned copy of the current roots.
    fn snapshot(&self) -> Vec<Comment> {
        self.with_comments(|c| c.to_vec())
    }
}

impl CommentStore for Vec<Comment> {
    fn with_comments<R>(&self, f: impl FnOnce(&[Comment]) -> R) -> R {
        f(self)
    }

    fn replace(&mut self, comments: Vec<Comment>) {
        *self = comments;
    }
}

impl CommentStore for Rc<RefCell<Vec<Comment>>> {
    fn with_comments<R>(&self, f: impl FnOnce(&[Comment]) -> R) -> R {
        f(&self.borrow())
    }

    fn replace(&mut self, comments: Vec<Comment>) {
        *self.borrow_mut() = comments;
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Builds a comment from `(author, content)`.
pub type CommentTemplate = Box<dyn Fn(&str, &str) -> Comment>;

/// Configuration for a comment section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SectionOptions {
    /// Name of the current user; authors posts and pre-fills the dialog.
    pub username: String,
    /// Whether the dialog lets the user change the author name.
    pub allow_to_modify_username: bool,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            username: "You".to_string(),
            allow_to_modify_username: false,
        }
    }
}

impl SectionOptions {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Builder: Allow changing the author in the dialog.
    pub fn with_modifiable_username(mut self, allow: bool) -> Self {
        self.allow_to_modify_username = allow;
        self
    }
}

// =============================================================================
// SECTION
// =============================================================================

/// What a confirmed dialog request should create.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Intent {
    NewThread,
    Reply { parent_id: String },
}

struct OpenRequest {
    intent: Intent,
    dialog: Pending<NewComment>,
    reply_to: Settle<String>,
}

/// Stateful controller for a threaded comment panel.
pub struct CommentSection<S: CommentStore = Vec<Comment>> {
    store: S,
    options: SectionOptions,
    template: CommentTemplate,
    dialog: CommentDialog,
    request: Option<OpenRequest>,
    filter: FilterMode,
    active_id: Option<String>,
}

impl CommentSection<Vec<Comment>> {
    /// Creates a section that owns its comment tree.
    pub fn new(options: SectionOptions) -> Self {
        Self::with_store(Vec::new(), options)
    }
}

impl CommentSection<Rc<RefCell<Vec<Comment>>>> {
    /// Creates a section over a tree owned by the caller.
    pub fn controlled(comments: Rc<RefCell<Vec<Comment>>>, options: SectionOptions) -> Self {
        Self::with_store(comments, options)
    }
}

impl<S: CommentStore> CommentSection<S> {
    /// Creates a section over any store.
    pub fn with_store(store: S, options: SectionOptions) -> Self {
        Self {
            store,
            options,
            template: Box::new(Comment::create),
            dialog: CommentDialog::new(),
            request: None,
            filter: FilterMode::All,
            active_id: None,
        }
    }

    /// Builder: Replace the function that builds new comments.
    pub fn with_template<F>(mut self, template: F) -> Self
    where
        F: Fn(&str, &str) -> Comment + 'static,
    {
        self.template = Box::new(template);
        self
    }

    pub fn options(&self) -> &SectionOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Owned copy of the full (unfiltered) tree.
    pub fn comments(&self) -> Vec<Comment> {
        self.store.snapshot()
    }

    fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&[Comment]) -> Vec<Comment>,
    {
        let next = self.store.with_comments(f);
        self.store.replace(next);
    }

    // =========================================================================
    // DIRECT MUTATIONS
    // =========================================================================

    /// Posts a top-level comment as the current user.
    ///
    /// Returns the new id, or `None` if `content` is blank.
    pub fn post(&mut self, content: &str) -> Option<String> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let comment = (self.template)(&self.options.username, content);
        let id = comment.id.clone();
        self.update(|roots| prepend(roots, comment));
        debug!(id = %id, "comment posted");
        Some(id)
    }

    /// Replaces the whole tree, e.g. with comments loaded by the application.
    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.store.replace(comments);
    }

    pub fn toggle_resolved(&mut self, id: &str) {
        self.update(|roots| tree::toggle_resolved(roots, id));
    }

    pub fn update_content(&mut self, id: &str, content: &str) {
        self.update(|roots| tree::update_content(roots, id, content));
    }

    // =========================================================================
    // DIALOG FLOWS
    // =========================================================================

    /// Asks the user for a reply to `parent_id`.
    ///
    /// The returned id settles once the dialog is confirmed, cancelled or
    /// dismissed through this section.
    pub fn reply(&mut self, parent_id: &str) -> Pending<String> {
        self.open_request(Intent::Reply {
            parent_id: parent_id.to_string(),
        })
    }

    /// Asks the user for a new top-level comment (the editor's "Comment" action).
    ///
    /// The host uses the settled id to anchor a comment mark in the document.
    pub fn new_thread(&mut self) -> Pending<String> {
        self.open_request(Intent::NewThread)
    }

    fn open_request(&mut self, intent: Intent) -> Pending<String> {
        let options = DialogOptions::new(self.options.username.clone())
            .with_author_editable(self.options.allow_to_modify_username);
        let dialog = self.dialog.request_new_comment(options);
        let (reply_to, pending) = deferred();

        let previous = self.request.replace(OpenRequest {
            intent,
            dialog,
            reply_to,
        });
        if let Some(mut previous) = previous {
            let err = previous
                .dialog
                .try_take()
                .and_then(Result::err)
                .unwrap_or(EditorError::DialogNotOpen);
            previous.reply_to.settle(Err(err));
        }
        pending
    }

    pub fn dialog(&self) -> &CommentDialog {
        &self.dialog
    }

    /// Edits the dialog's author field. `false` when the name is fixed.
    pub fn set_dialog_author(&mut self, author: impl Into<String>) -> bool {
        self.dialog.set_author(author)
    }

    pub fn set_dialog_content(&mut self, content: impl Into<String>) {
        self.dialog.set_content(content);
    }

    /// Confirms the dialog and applies the pending request. Returns the new id.
    ///
    /// A reply whose parent is gone is not inserted. Both this call and the
    /// pending id fail with `Cancelled(ParentMissing)`.
    pub fn confirm_dialog(&mut self) -> EditorResult<String> {
        if self.request.is_none() {
            return Err(EditorError::DialogNotOpen);
        }
        self.dialog.confirm()?;
        self.finish_request()
    }

    /// Explicit cancel. The tree is left untouched.
    pub fn cancel_dialog(&mut self) -> EditorResult<()> {
        self.dialog.cancel()?;
        self.finish_cancelled()
    }

    /// Dialog closed without an action. The tree is left untouched.
    pub fn dismiss_dialog(&mut self) -> EditorResult<()> {
        self.dialog.dismiss()?;
        self.finish_cancelled()
    }

    fn finish_cancelled(&mut self) -> EditorResult<()> {
        match self.finish_request() {
            Ok(_) => Ok(()),
            Err(err) if err.is_cancellation() => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Collects the dialog's settled result and applies it.
    fn finish_request(&mut self) -> EditorResult<String> {
        let Some(mut request) = self.request.take() else {
            return Err(EditorError::DialogNotOpen);
        };
        let Some(result) = request.dialog.try_take() else {
            self.request = Some(request);
            return Err(EditorError::DialogNotOpen);
        };

        let outcome = result.and_then(|new_comment| self.apply(&request.intent, new_comment));
        request.reply_to.settle(outcome.clone());
        outcome
    }

    /// Fails with `Cancelled(ParentMissing)` when a reply's parent was
    /// removed while the dialog was open.
    fn apply(&mut self, intent: &Intent, new_comment: NewComment) -> EditorResult<String> {
        if let Intent::Reply { parent_id } = intent {
            if self.store.with_comments(|roots| tree::find(roots, parent_id).is_none()) {
                debug!(parent_id = %parent_id, "reply dropped, parent no longer exists");
                return Err(EditorError::cancelled(CancelReason::ParentMissing));
            }
        }

        let comment = (self.template)(&new_comment.author, &new_comment.content);
        let id = comment.id.clone();
        match intent {
            Intent::NewThread => {
                self.update(|roots| prepend(roots, comment));
                debug!(id = %id, "comment thread created");
            }
            Intent::Reply { parent_id } => {
                // A new reply reopens the thread it answers.
                self.update(|roots| {
                    let with_reply = tree::add_reply(roots, parent_id, comment);
                    tree::set_resolved(&with_reply, parent_id, false)
                });
                debug!(id = %id, parent_id = %parent_id, "reply created");
            }
        }
        Ok(id)
    }

    // =========================================================================
    // FILTER & SELECTION
    // =========================================================================

    pub fn set_filter(&mut self, mode: FilterMode) {
        debug!(filter = %mode, "comment filter changed");
        self.filter = mode;
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Records the comment currently correlated with the host selection.
    pub fn set_active(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!(id = %id, "active comment");
        self.active_id = Some(id);
    }

    pub fn clear_active(&mut self) {
        self.active_id = None;
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    // =========================================================================
    // DERIVED
    // =========================================================================

    /// The tree as displayed under the current filter.
    pub fn visible_comments(&self) -> Vec<Comment> {
        let mode = self.filter;
        self.store
            .with_comments(|roots| tree::filter(roots, |c| mode.matches(c)))
    }

    /// Number of displayed comments at all depths.
    pub fn total_visible_count(&self) -> usize {
        tree::count_all(&self.visible_comments())
    }

    /// Placeholder text for an empty panel.
    pub fn empty_message(&self) -> String {
        match self.filter {
            FilterMode::All => "No comments yet. Be the first to comment!".to_string(),
            other => format!("No {other} comments found."),
        }
    }
}

impl<S: CommentStore> fmt::Debug for CommentSection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentSection")
            .field("options", &self.options)
            .field("filter", &self.filter)
            .field("active_id", &self.active_id)
            .field("dialog_open", &self.dialog.is_open())
            .finish_non_exhaustive()
    }
}

fn prepend(roots: &[Comment], comment: Comment) -> Vec<Comment> {
    let mut next = Vec::with_capacity(roots.len() + 1);
    next.push(comment);
    next.extend_from_slice(roots);
    next
}
