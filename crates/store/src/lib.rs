//! Save data storage.
//!
//! [`KeyValueStore`] abstracts the string-keyed backing store (in-memory for
//! tests, a JSON file for the terminal game). [`PersistenceStore`] maps a
//! [`SaveRecord`](tui_concentration_types::SaveRecord) onto it using the
//! `Save_*` key layout.

pub mod codec;
pub mod error;
pub mod file;
pub mod kv;
pub mod persistence;

pub use tui_concentration_types as types;

pub use codec::{decode_ids, encode_ids};
pub use error::{PersistenceError, Result};
pub use file::JsonFileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use persistence::{keys, PersistenceStore};
