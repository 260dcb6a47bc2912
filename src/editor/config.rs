//! Editor configuration and the surface-level state around the host.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::host::HostEditor;
use super::toolbar::{self, BubbleMenu, ToolbarItem};

/// Languages bundled for code-block highlighting.
pub const COMMON_LANGUAGES: &[&str] = &[
    "arduino",
    "bash",
    "c",
    "cpp",
    "csharp",
    "css",
    "diff",
    "go",
    "graphql",
    "ini",
    "java",
    "javascript",
    "json",
    "kotlin",
    "less",
    "lua",
    "makefile",
    "markdown",
    "objectivec",
    "perl",
    "php",
    "php-template",
    "plaintext",
    "python",
    "python-repl",
    "r",
    "ruby",
    "rust",
    "scss",
    "shell",
    "sql",
    "swift",
    "typescript",
    "vbnet",
    "wasm",
    "xml",
    "yaml",
];

/// Options an editor instance is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorOptions {
    /// Initial document, as serialized by the host (markdown).
    pub content: String,
    pub placeholder: Option<String>,
    /// Code-block languages to register. `None` registers all of
    /// [`COMMON_LANGUAGES`].
    pub code_languages: Option<Vec<String>>,
    /// Enables comment marks, the Comment command and the bubble toggle.
    pub comments: bool,
    /// Enables `@` mention suggestions.
    pub mentions: bool,
    pub editable: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            content: String::new(),
            placeholder: None,
            code_languages: None,
            comments: false,
            mentions: false,
            editable: true,
        }
    }
}

impl EditorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_code_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.code_languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.comments = enabled;
        self
    }

    pub fn with_mentions(mut self, enabled: bool) -> Self {
        self.mentions = enabled;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Languages offered in the code-block picker.
    ///
    /// Requested names that are not bundled are skipped, duplicates are kept
    /// once, and the request order is preserved.
    pub fn supported_code_languages(&self) -> Vec<&'static str> {
        let Some(requested) = &self.code_languages else {
            return COMMON_LANGUAGES.to_vec();
        };

        let mut languages = Vec::new();
        for name in requested {
            match COMMON_LANGUAGES.iter().find(|lang| **lang == name.as_str()) {
                Some(lang) if !languages.contains(lang) => languages.push(*lang),
                Some(_) => {}
                None => debug!(language = %name, "unsupported code language skipped"),
            }
        }
        languages
    }
}

pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// The editor chrome around the host: markdown-mode toggle, last known
/// content and change notification.
pub struct EditorSurface {
    options: EditorOptions,
    markdown_mode: bool,
    content: String,
    on_change: Option<ChangeCallback>,
}

impl EditorSurface {
    pub fn new(options: EditorOptions) -> Self {
        let content = options.content.clone();
        Self {
            options,
            markdown_mode: false,
            content,
            on_change: None,
        }
    }

    pub fn with_on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn is_markdown_mode(&self) -> bool {
        self.markdown_mode
    }

    /// Switches between rich text and markdown source. Returns the new mode.
    pub fn toggle_markdown_mode(&mut self) -> bool {
        self.markdown_mode = !self.markdown_mode;
        debug!(markdown = self.markdown_mode, "editor mode toggled");
        self.markdown_mode
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Records a host update and forwards the serialized document.
    pub fn notify_change(&mut self, content: impl Into<String>) {
        self.content = content.into();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.content);
        }
    }

    /// Applies an edit made in the markdown-source view.
    ///
    /// Read-only editors ignore it. The host reports the resulting document
    /// through [`EditorSurface::notify_change`] like any other update.
    pub fn edit_markdown_source<H: HostEditor + ?Sized>(&self, host: &mut H, source: &str) -> bool {
        if !self.options.editable {
            return false;
        }
        toolbar::apply_markdown_source(host, source)
    }

    pub fn toolbar<H: HostEditor + ?Sized>(&self, host: &H) -> Vec<Vec<ToolbarItem>> {
        toolbar::toolbar(host, self.options.comments)
    }

    pub fn bubble_menu(&self) -> BubbleMenu {
        BubbleMenu::new(self.options.comments)
    }

    /// Footer text, e.g. `"Rich Text Mode • 42 characters"`.
    pub fn status_line(&self) -> String {
        let mode = if self.markdown_mode {
            "Markdown Mode"
        } else {
            "Rich Text Mode"
        };
        format!("{mode} • {} characters", self.content.chars().count())
    }
}

impl fmt::Debug for EditorSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSurface")
            .field("options", &self.options)
            .field("markdown_mode", &self.markdown_mode)
            .field("content_len", &self.content.len())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
