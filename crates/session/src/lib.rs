//! Session controller for the memory-matching game.
//!
//! [`GameSession`] is constructed once by the host and passed around by
//! reference; there is no global instance. It exposes the operations a UI
//! needs (`new_game`, `resume_or_new_game`, `select_card`, `tick`,
//! `reset_game`, `restart`, counters and snapshots) and drains the engine's
//! [`GameEvent`](tui_concentration_types::GameEvent)s for the host.
//!
//! # Example
//!
//! ```
//! use tui_concentration_session::{GameSession, SessionConfig, StartKind};
//! use tui_concentration_store::MemoryStore;
//!
//! let config = SessionConfig::default().with_grid(2, 2).with_seed(7);
//! let mut session = GameSession::new(config, MemoryStore::new()).unwrap();
//!
//! // Nothing saved yet, so a new board is dealt.
//! assert_eq!(session.resume_or_new_game().unwrap(), StartKind::Fresh);
//! assert_eq!(session.engine().cards().len(), 4);
//! assert!(!session.is_busy());
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use tui_concentration_core as core;
pub use tui_concentration_store as store;
pub use tui_concentration_types as types;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use session::{GameSession, StartKind};
