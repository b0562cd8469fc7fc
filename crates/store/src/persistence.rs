//! Save/resume persistence over a [`KeyValueStore`].
//!
//! A save is eight keys written together. [`PersistenceStore::save`] captures
//! the previous values first and puts them back if any write (or the final
//! flush) fails, so callers see either the whole new record or the old one.

use std::str::FromStr;

use crate::codec::{decode_ids, encode_ids};
use crate::error::{PersistenceError, Result};
use crate::kv::KeyValueStore;
use crate::types::{SaveRecord, DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Persisted key names.
pub mod keys {
    pub const SCORE: &str = "Save_Score";
    pub const TURNS: &str = "Save_Turns";
    pub const TIME: &str = "Save_Time";
    pub const ROWS: &str = "Save_Rows";
    pub const COLUMNS: &str = "Save_Cols";
    pub const COMBO: &str = "Save_Combo";
    pub const MATCHED: &str = "Save_Matched";
    pub const SHUFFLED: &str = "Save_Shuffled";

    pub const ALL: [&str; 8] = [SCORE, TURNS, TIME, ROWS, COLUMNS, COMBO, MATCHED, SHUFFLED];
}

#[derive(Debug, Clone, Default)]
pub struct PersistenceStore<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Write every field of `record`, all or nothing.
    pub fn save(&mut self, record: &SaveRecord) -> Result<()> {
        let entries = [
            (keys::SCORE, record.score.to_string()),
            (keys::TURNS, record.turns.to_string()),
            (keys::TIME, record.elapsed_time.to_string()),
            (keys::ROWS, record.rows.to_string()),
            (keys::COLUMNS, record.columns.to_string()),
            (keys::COMBO, record.combo.to_string()),
            (keys::MATCHED, encode_ids(&record.matched_ids)),
            (keys::SHUFFLED, encode_ids(&record.shuffled_deck)),
        ];

        let mut previous = Vec::with_capacity(keys::ALL.len());
        for key in keys::ALL {
            previous.push((key, self.store.get(key)?));
        }

        match self.write_entries(&entries) {
            Ok(()) => {
                log::info!(
                    "saved progress: score {}, turns {}, {}/{} pairs",
                    record.score,
                    record.turns,
                    record.matched_ids.len(),
                    record.total_pairs()
                );
                Ok(())
            }
            Err(err) => {
                log::warn!("save failed, restoring previous values: {}", err);
                self.restore(&previous);
                Err(err)
            }
        }
    }

    fn write_entries(&mut self, entries: &[(&'static str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.store.set(key, value)?;
        }
        self.store.flush()
    }

    fn restore(&mut self, previous: &[(&'static str, Option<String>)]) {
        for (key, value) in previous {
            let restored = match value {
                Some(value) => self.store.set(key, value),
                None => self.store.delete(key),
            };
            if let Err(err) = restored {
                log::warn!("could not restore `{}` after failed save: {}", key, err);
            }
        }
    }

    /// Read the saved record; absent fields take their defaults.
    pub fn load(&self) -> Result<SaveRecord> {
        let defaults = SaveRecord::default();

        let matched_ids = match self.store.get(keys::MATCHED)? {
            Some(text) => decode_ids(keys::MATCHED, &text)?,
            None => Vec::new(),
        };
        let shuffled_deck = match self.store.get(keys::SHUFFLED)? {
            Some(text) => decode_ids(keys::SHUFFLED, &text)?,
            None => Vec::new(),
        };

        Ok(SaveRecord {
            score: self.parsed(keys::SCORE, defaults.score)?,
            turns: self.parsed(keys::TURNS, defaults.turns)?,
            elapsed_time: self.parsed(keys::TIME, defaults.elapsed_time)?,
            rows: self.parsed(keys::ROWS, DEFAULT_ROWS)?,
            columns: self.parsed(keys::COLUMNS, DEFAULT_COLUMNS)?,
            combo: self.parsed(keys::COMBO, defaults.combo)?,
            matched_ids,
            shuffled_deck,
        })
    }

    fn parsed<T: FromStr>(&self, key: &'static str, default: T) -> Result<T> {
        match self.store.get(key)? {
            Some(text) => match text.trim().parse() {
                Ok(value) => Ok(value),
                Err(_) => Err(PersistenceError::Malformed { key, value: text }),
            },
            None => Ok(default),
        }
    }

    /// Whether a resumable save exists.
    pub fn has_save(&self) -> Result<bool> {
        Ok(self.store.has(keys::SCORE)? && self.store.has(keys::SHUFFLED)?)
    }

    /// Remove every saved key.
    pub fn clear(&mut self) -> Result<()> {
        for key in keys::ALL {
            self.store.delete(key)?;
        }
        self.store.flush()?;
        log::info!("save data cleared");
        Ok(())
    }
}
