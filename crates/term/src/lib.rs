//! Terminal rendering for the memory-matching game.
//!
//! A small, game-oriented layer: [`GameView`] paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes framebuffers to the terminal, sending only
//! the cells that changed. Cards are drawn wider than they are tall to
//! compensate for terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_concentration_core as core;
pub use tui_concentration_types as types;

pub use fb::{BoxChars, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{face_for, format_elapsed, GameView, Hud, Viewport, FACES};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
