//! Terminal memory-matching game (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` so hosts, integration tests
//! and benchmarks can reach everything through `tui_concentration::*`.

pub use tui_concentration_core as core;
pub use tui_concentration_input as input;
pub use tui_concentration_session as session;
pub use tui_concentration_store as store;
pub use tui_concentration_term as term;
pub use tui_concentration_types as types;
