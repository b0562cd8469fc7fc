//! Comma-joined decimal encoding for id sequences.
//!
//! The empty sequence encodes to the empty string and decodes back to an
//! empty sequence, never to `[0]`.

use crate::error::{PersistenceError, Result};
use crate::types::CardId;

pub fn encode_ids(ids: &[CardId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn decode_ids(key: &'static str, text: &str) -> Result<Vec<CardId>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .map(|part| {
            part.trim()
                .parse::<CardId>()
                .map_err(|_| PersistenceError::Malformed {
                    key,
                    value: text.to_owned(),
                })
        })
        .collect()
}
