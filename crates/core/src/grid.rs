//! Grid module - shuffled pair decks
//!
//! A deck for an `R x C` grid holds `R*C/2` ids, each exactly twice. The
//! shuffled order is the visual (row-major) arrangement of the board.
//!
//! The generator is generic over its random source so tests can inject a
//! seeded RNG; the production session uses an entropy-seeded [`SmallRng`].

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{GridError, Result};
use crate::types::CardId;

/// Number of cards on a `rows x columns` grid, if it can be dealt in pairs.
pub fn card_count(rows: u16, columns: u16) -> Result<usize> {
    let cells = usize::from(rows) * usize::from(columns);
    if cells < 2 || cells % 2 != 0 {
        return Err(GridError::InvalidGrid { rows, columns });
    }
    Ok(cells)
}

/// Unshuffled deck `[0, 0, 1, 1, ...]` for `cards` cards.
pub fn paired_deck(cards: usize) -> Vec<CardId> {
    (0..cards / 2)
        .flat_map(|id| {
            let id = id as CardId;
            [id, id]
        })
        .collect()
}

/// Shuffle a slice using Fisher-Yates.
///
/// Walks from the end, swapping each position `i` with a uniformly chosen
/// index in `[0, i]`, so every permutation is equally likely.
pub fn shuffle<T, R: Rng>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

/// Check that `deck` fills a `rows x columns` grid with exact pairs.
pub fn validate_deck(rows: u16, columns: u16, deck: &[CardId]) -> Result<()> {
    let expected = card_count(rows, columns)?;
    if deck.len() != expected {
        return Err(GridError::DeckSizeMismatch {
            rows,
            columns,
            expected,
            actual: deck.len(),
        });
    }

    let mut counts: BTreeMap<CardId, usize> = BTreeMap::new();
    for &id in deck {
        *counts.entry(id).or_default() += 1;
    }
    match counts.into_iter().find(|&(_, count)| count != 2) {
        Some((id, count)) => Err(GridError::UnpairedCard { id, count }),
        None => Ok(()),
    }
}

/// Produces shuffled pair decks.
#[derive(Debug, Clone)]
pub struct GridGenerator<R> {
    rng: R,
}

impl<R: Rng> GridGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a shuffled deck for a `rows x columns` grid.
    pub fn generate(&mut self, rows: u16, columns: u16) -> Result<Vec<CardId>> {
        let cards = card_count(rows, columns)?;
        let mut deck = paired_deck(cards);
        shuffle(&mut self.rng, &mut deck);
        log::debug!("dealt {}x{} deck of {} pairs", rows, columns, cards / 2);
        Ok(deck)
    }
}

impl GridGenerator<SmallRng> {
    /// Deterministic generator for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Non-deterministic generator for real play.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}
