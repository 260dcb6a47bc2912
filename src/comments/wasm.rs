//! WASM bindings for the comments module.
//!
//! This module provides a JavaScript-friendly wrapper around
//! [`CommentSection`] for use in browser environments.

use js_sys::Array;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

use super::display;
use super::model::{now_ms, Comment, FilterMode};
use super::section::{CommentSection, SectionOptions};
use crate::error::EditorError;

/// Serialize a value to JsValue with maps as plain JS objects (not Map).
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::new().serialize_maps_as_objects(true))
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<EditorError> for JsValue {
    fn from(err: EditorError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Helper macro for Result conversion
macro_rules! js_result {
    ($expr:expr) => {
        $expr.map_err(|e: EditorError| JsValue::from(e))
    };
}

// =============================================================================
// MAIN WRAPPER TYPE
// =============================================================================

/// JavaScript-friendly wrapper around CommentSection.
///
/// The dialog is driven from JS: `reply()` / `newThread()` open it, the form
/// is bound through `setDialogAuthor()` / `setDialogContent()`, and
/// `confirmDialog()` / `cancelDialog()` / `dismissDialog()` settle it.
#[wasm_bindgen]
pub struct JsCommentSection {
    inner: CommentSection,
}

#[wasm_bindgen]
impl JsCommentSection {
    /// Creates a new comment section.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const section = new JsCommentSection({ username: 'Ada', allow_to_modify_username: false });
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsCommentSection, JsValue> {
        let options: SectionOptions = if options.is_undefined() || options.is_null() {
            SectionOptions::default()
        } else {
            from_value(options)?
        };
        Ok(JsCommentSection {
            inner: CommentSection::new(options),
        })
    }

    /// Replaces the whole tree, e.g. with comments loaded by the application.
    #[wasm_bindgen(js_name = setComments)]
    pub fn set_comments(&mut self, comments: JsValue) -> Result<(), JsValue> {
        let comments: Vec<Comment> = from_value(comments)?;
        self.inner.set_comments(comments);
        Ok(())
    }

    /// Gets the full tree as an array of plain objects.
    #[wasm_bindgen(js_name = getComments)]
    pub fn get_comments(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.comments())?)
    }

    /// Gets the tree as filtered for display.
    #[wasm_bindgen(js_name = visibleComments)]
    pub fn visible_comments(&self) -> Result<JsValue, JsValue> {
        Ok(to_js_value(&self.inner.visible_comments())?)
    }

    /// Number of displayed comments at all depths.
    #[wasm_bindgen(js_name = totalVisibleCount)]
    pub fn total_visible_count(&self) -> u32 {
        self.inner.total_visible_count() as u32
    }

    #[wasm_bindgen(js_name = emptyMessage)]
    pub fn empty_message(&self) -> String {
        self.inner.empty_message()
    }
}

// =============================================================================
// MUTATIONS
// =============================================================================

#[wasm_bindgen]
impl JsCommentSection {
    /// Posts a top-level comment. Returns the new id, or undefined if blank.
    pub fn post(&mut self, content: &str) -> Option<String> {
        self.inner.post(content)
    }

    #[wasm_bindgen(js_name = toggleResolved)]
    pub fn toggle_resolved(&mut self, id: &str) {
        self.inner.toggle_resolved(id)
    }

    #[wasm_bindgen(js_name = updateContent)]
    pub fn update_content(&mut self, id: &str, content: &str) {
        self.inner.update_content(id, content)
    }

    /// Sets the filter: "all", "resolved" or "unresolved".
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = js_result!(mode.parse::<FilterMode>())?;
        self.inner.set_filter(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = getFilter)]
    pub fn get_filter(&self) -> String {
        self.inner.filter().to_string()
    }

    #[wasm_bindgen(js_name = setActive)]
    pub fn set_active(&mut self, id: Option<String>) {
        match id {
            Some(id) => self.inner.set_active(id),
            None => self.inner.clear_active(),
        }
    }

    #[wasm_bindgen(js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        self.inner.active_id().map(str::to_string)
    }
}

// =============================================================================
// DIALOG
// =============================================================================

#[wasm_bindgen]
impl JsCommentSection {
    /// Opens the dialog for a reply to `parentId`.
    pub fn reply(&mut self, parent_id: &str) {
        // JS observes the outcome through confirmDialog()/cancelDialog().
        let _ = self.inner.reply(parent_id);
    }

    /// Opens the dialog for a new top-level comment.
    #[wasm_bindgen(js_name = newThread)]
    pub fn new_thread(&mut self) {
        let _ = self.inner.new_thread();
    }

    #[wasm_bindgen(js_name = isDialogOpen)]
    pub fn is_dialog_open(&self) -> bool {
        self.inner.dialog().is_open()
    }

    #[wasm_bindgen(js_name = dialogAuthor)]
    pub fn dialog_author(&self) -> String {
        self.inner.dialog().author().to_string()
    }

    #[wasm_bindgen(js_name = setDialogAuthor)]
    pub fn set_dialog_author(&mut self, author: &str) -> bool {
        self.inner.set_dialog_author(author)
    }

    #[wasm_bindgen(js_name = setDialogContent)]
    pub fn set_dialog_content(&mut self, content: &str) {
        self.inner.set_dialog_content(content)
    }

    #[wasm_bindgen(js_name = canConfirm)]
    pub fn can_confirm(&self) -> bool {
        self.inner.dialog().can_confirm()
    }

    /// Confirms the dialog. Returns the id of the created comment.
    #[wasm_bindgen(js_name = confirmDialog)]
    pub fn confirm_dialog(&mut self) -> Result<String, JsValue> {
        js_result!(self.inner.confirm_dialog())
    }

    #[wasm_bindgen(js_name = cancelDialog)]
    pub fn cancel_dialog(&mut self) -> Result<(), JsValue> {
        js_result!(self.inner.cancel_dialog())
    }

    #[wasm_bindgen(js_name = dismissDialog)]
    pub fn dismiss_dialog(&mut self) -> Result<(), JsValue> {
        js_result!(self.inner.dismiss_dialog())
    }
}

// =============================================================================
// DISPLAY HELPERS
// =============================================================================

/// Relative age of a comment created at `createdAt` (unix ms).
#[wasm_bindgen(js_name = formatTimeAgo)]
pub fn format_time_ago(created_at: f64) -> String {
    display::format_time_ago(created_at as i64, now_ms())
}

/// Avatar initials for a display name.
#[wasm_bindgen(js_name = initials)]
pub fn initials(name: &str) -> String {
    display::initials(name)
}

/// All comment ids in display order, flattened.
#[wasm_bindgen(js_name = commentIds)]
pub fn comment_ids(comments: JsValue) -> Result<Array, JsValue> {
    let comments: Vec<Comment> = from_value(comments)?;
    let array = Array::new();
    for id in super::tree::ids(&comments) {
        array.push(&JsValue::from_str(id));
    }
    Ok(array)
}
