//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and tracks
//! the board cursor those actions move. Independent of any rendering.

pub mod cursor;
pub mod map;

pub use tui_concentration_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit};
