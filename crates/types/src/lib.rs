//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data shared by every other crate in the
//! workspace: card identifiers, timing and scoring constants, the actions a
//! host feeds into a session, the events a session emits, and the persisted
//! save projection. Nothing here has behavior of its own.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed host timestep (~60 FPS) |
//! | `MATCH_DELAY_MS` | 500 | Evaluation window after the second card flips |
//!
//! # Scoring
//!
//! A match awards `BASE_POINTS`, multiplied by the combo streak once the
//! streak exceeds one: 10, 20, 30, ... for consecutive matches.
//!
//! # Examples
//!
//! ```
//! use tui_concentration_types::{GameEvent, SaveRecord, BASE_POINTS};
//!
//! let event = GameEvent::Matched { combo: 2, points: 2 * BASE_POINTS };
//! assert!(event.is_match());
//!
//! let empty = SaveRecord::default();
//! assert_eq!((empty.rows, empty.columns), (2, 2));
//! assert!(empty.shuffled_deck.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Pair-token identity. Two cards share an id iff they are a matching pair.
pub type CardId = u32;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long both selected cards stay face-up before the pair is judged.
pub const MATCH_DELAY_MS: u32 = 500;

/// Points for an isolated match; consecutive matches multiply it by the combo.
pub const BASE_POINTS: u32 = 10;

/// Grid rows assumed when a save does not record them.
pub const DEFAULT_ROWS: u16 = 2;

/// Grid columns assumed when a save does not record them.
pub const DEFAULT_COLUMNS: u16 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_and_scoring_defaults() {
        assert_eq!(MATCH_DELAY_MS, 500);
        assert_eq!(BASE_POINTS, 10);
        assert_eq!(TICK_MS, 16);
        assert_eq!((DEFAULT_ROWS, DEFAULT_COLUMNS), (2, 2));
    }

    #[test]
    fn default_save_record_matches_empty_store_defaults() {
        let record = SaveRecord::default();
        assert_eq!(record.score, 0);
        assert_eq!(record.turns, 0);
        assert_eq!(record.elapsed_time, 0.0);
        assert_eq!(record.combo, 0);
        assert!(record.matched_ids.is_empty());
        assert!(record.shuffled_deck.is_empty());
        assert_eq!(record.total_pairs(), 0);
    }
}

/// Actions a host can feed into the game loop.
///
/// Cursor movement is handled by the host; `Select` flips the card under the
/// cursor and `Restart` abandons the current board for a fresh deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Flip the card under the cursor
    Select,
    /// Drop the current board (and its save) and deal a new one
    Restart,
}

/// Outward notification queued by the match engine.
///
/// Hosts drain these after each input or tick and forward them to whatever
/// plays sounds or animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A card at `index` turned face-up because it was selected.
    Flipped { index: usize },
    /// The pending pair matched. `points` were awarded at streak `combo`.
    Matched { combo: u32, points: u32 },
    /// The pending pair did not match and both cards turned back.
    Mismatched,
    /// The last pair was matched.
    GameOver {
        score: u32,
        turns: u32,
        elapsed_secs: f32,
    },
}

impl GameEvent {
    pub fn is_match(&self) -> bool {
        matches!(self, GameEvent::Matched { .. })
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }
}

/// Persisted projection of a game in progress.
///
/// `shuffled_deck` is the full deck in display order (row-major) and must be
/// restored verbatim; `matched_ids` lists each id whose pair is already
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub score: u32,
    pub turns: u32,
    /// Elapsed play time in seconds.
    pub elapsed_time: f32,
    pub rows: u16,
    pub columns: u16,
    pub combo: u32,
    pub matched_ids: Vec<CardId>,
    pub shuffled_deck: Vec<CardId>,
}

impl SaveRecord {
    pub fn total_pairs(&self) -> usize {
        self.shuffled_deck.len() / 2
    }
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            score: 0,
            turns: 0,
            elapsed_time: 0.0,
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            combo: 0,
            matched_ids: Vec::new(),
            shuffled_deck: Vec::new(),
        }
    }
}
