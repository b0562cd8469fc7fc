//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the memory-matching game and nothing else:
//! no terminal, no storage, no clock of its own.
//!
//! - **Deterministic**: a seeded [`GridGenerator`] deals the same deck every time
//! - **Host-driven time**: the evaluation delay and play clock advance only
//!   through [`MatchEngine::tick`]
//! - **Single writer**: [`MatchEngine`] is the only thing that mutates cards,
//!   score, turns and combo
//!
//! # Module Structure
//!
//! - [`grid`]: paired deck generation and Fisher-Yates shuffle
//! - [`card`]: per-cell state (id, face-up, matched)
//! - [`scoring`]: score/turn/combo bookkeeping and the combo formula
//! - [`timer`]: one-shot countdown used for the evaluation delay
//! - [`engine`]: the selection state machine
//! - [`snapshot`]: read-only board copy for rendering
//!
//! # Example
//!
//! ```
//! use tui_concentration_core::{EngineConfig, GridGenerator, MatchEngine, Resolution};
//! use tui_concentration_types::MATCH_DELAY_MS;
//!
//! let deck = GridGenerator::seeded(12345).generate(2, 2).unwrap();
//! let mut engine = MatchEngine::new(2, 2, &deck, EngineConfig::default()).unwrap();
//!
//! // Find the partner of the first card and flip both.
//! let partner = (1..4).find(|&i| deck[i] == deck[0]).unwrap();
//! engine.select(0);
//! engine.select(partner);
//! assert!(engine.is_busy());
//!
//! // The pair is judged once the delay elapses.
//! let resolution = engine.tick(MATCH_DELAY_MS);
//! assert!(matches!(resolution, Some(Resolution::Match { points: 10, .. })));
//! assert_eq!(engine.score(), 10);
//! ```

pub mod card;
pub mod engine;
pub mod error;
pub mod grid;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use tui_concentration_types as types;

pub use card::Card;
pub use engine::{EngineConfig, EngineState, MatchEngine, Resolution, SelectOutcome};
pub use error::{GridError, Result};
pub use grid::{card_count, paired_deck, shuffle, validate_deck, GridGenerator};
pub use scoring::{points_for_match, ScoreTracker};
pub use snapshot::GameSnapshot;
pub use timer::DelayTimer;

/// Generator used by real sessions.
pub type DefaultGridGenerator = GridGenerator<rand::rngs::SmallRng>;
