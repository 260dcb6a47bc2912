//! Trigger-character suggestion overlays.
//!
//! This module provides:
//! - `state`: overlay state, keys, transitions and trigger matching
//! - `overlay`: the generic SuggestionOverlay state machine
//! - `slash`: `/` commands over the command catalog
//! - `mention`: `@` mentions backed by a query function

pub mod mention;
pub mod overlay;
pub mod slash;
pub mod state;

pub use mention::{render_mention_markdown, MentionNode, Mentions};
pub use overlay::{SuggestionOverlay, SuggestionProvider};
pub use slash::SlashCommands;
pub use state::{find_trigger, Key, SuggestionState, Transition, TriggerMatch};
