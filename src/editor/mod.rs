//! Editor chrome built on top of a host rich-text surface.
//!
//! This module provides:
//! - `host`: the HostEditor trait and the commands it executes
//! - `commands`: the command catalog and its dispatcher
//! - `toolbar`: toolbar and bubble-menu view models
//! - `config`: EditorOptions, code languages and EditorSurface

pub mod commands;
pub mod config;
pub mod host;
pub mod toolbar;

pub use commands::{dispatch, CommandDescriptor, CommandId, Dispatch};
pub use config::{EditorOptions, EditorSurface};
pub use host::{ActiveCheck, EditorCommand, HostEditor, Rect, TextAlign, TextRange};
pub use toolbar::{BubbleMenu, BubbleOutcome, ToolbarItem};
