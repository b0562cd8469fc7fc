//! Match engine - the card selection state machine
//!
//! ```text
//! Idle --select--> OneSelected --select--> Evaluating --delay--> Idle | Complete
//! ```
//!
//! While `Evaluating` the engine is busy: further selections are ignored until
//! the evaluation delay elapses and the pair is judged. The host drives time
//! through [`MatchEngine::tick`]; the same tick also accumulates play time.

use std::collections::BTreeSet;

use crate::card::Card;
use crate::error::{GridError, Result};
use crate::grid::validate_deck;
use crate::scoring::ScoreTracker;
use crate::snapshot::GameSnapshot;
use crate::timer::DelayTimer;
use crate::types::{CardId, GameEvent, SaveRecord, BASE_POINTS, MATCH_DELAY_MS};

/// Tunables for a match engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long a selected pair stays face-up before it is judged.
    pub match_delay_ms: u32,
    pub base_points: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_delay_ms: MATCH_DELAY_MS,
            base_points: BASE_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineState {
    #[default]
    Idle,
    OneSelected,
    Evaluating,
    Complete,
}

impl EngineState {
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Evaluating)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The selection was not accepted; nothing changed.
    Ignored,
    FirstSelected,
    /// Second card flipped; the pair is now pending evaluation.
    Evaluating,
}

/// How a pending pair was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Match {
        combo: u32,
        points: u32,
        /// This was the last pair on the board.
        completed: bool,
    },
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: EngineConfig,
    rows: u16,
    columns: u16,
    cards: Vec<Card>,
    tracker: ScoreTracker,
    matched_pairs: u32,
    total_pairs: u32,
    first: Option<usize>,
    second: Option<usize>,
    eval_timer: DelayTimer,
    elapsed_ms: u64,
    /// Play time accumulates only while set.
    clock_running: bool,
    complete: bool,
    events: Vec<GameEvent>,
}

impl MatchEngine {
    /// Lay out a fresh board from `deck` (row-major) and start the clock.
    pub fn new(rows: u16, columns: u16, deck: &[CardId], config: EngineConfig) -> Result<Self> {
        validate_deck(rows, columns, deck)?;

        Ok(Self {
            config,
            rows,
            columns,
            cards: deck.iter().copied().map(Card::new).collect(),
            tracker: ScoreTracker::new(),
            matched_pairs: 0,
            total_pairs: (deck.len() / 2) as u32,
            first: None,
            second: None,
            eval_timer: DelayTimer::new(),
            elapsed_ms: 0,
            clock_running: true,
            complete: false,
            events: Vec::new(),
        })
    }

    /// Rebuild a board exactly as saved, without reshuffling.
    ///
    /// Cards whose id is in `matched_ids` come back resolved; counters and the
    /// clock continue from the saved values.
    pub fn from_save(record: &SaveRecord, config: EngineConfig) -> Result<Self> {
        let deck = &record.shuffled_deck;
        validate_deck(record.rows, record.columns, deck)?;

        let matched: BTreeSet<CardId> = record.matched_ids.iter().copied().collect();
        if let Some(&id) = matched.iter().find(|id| !deck.contains(id)) {
            return Err(GridError::UnknownMatchedId { id });
        }

        let cards = deck
            .iter()
            .map(|&id| {
                if matched.contains(&id) {
                    Card::resolved(id)
                } else {
                    Card::new(id)
                }
            })
            .collect();
        let total_pairs = (deck.len() / 2) as u32;
        let matched_pairs = matched.len() as u32;
        let complete = matched_pairs >= total_pairs;

        log::debug!(
            "restored {}x{} board with {}/{} pairs matched",
            record.rows,
            record.columns,
            matched_pairs,
            total_pairs
        );

        Ok(Self {
            config,
            rows: record.rows,
            columns: record.columns,
            cards,
            tracker: ScoreTracker::restored(record.score, record.turns, record.combo),
            matched_pairs,
            total_pairs,
            first: None,
            second: None,
            eval_timer: DelayTimer::new(),
            elapsed_ms: secs_to_ms(record.elapsed_time),
            clock_running: !complete,
            complete,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    pub fn turns(&self) -> u32 {
        self.tracker.turns()
    }

    pub fn combo(&self) -> u32 {
        self.tracker.combo()
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    pub fn first_selected(&self) -> Option<usize> {
        self.first
    }

    pub fn second_selected(&self) -> Option<usize> {
        self.second
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ms as f32 / 1000.0
    }

    pub fn clock_running(&self) -> bool {
        self.clock_running
    }

    pub fn state(&self) -> EngineState {
        if self.complete {
            EngineState::Complete
        } else if self.second.is_some() {
            EngineState::Evaluating
        } else if self.first.is_some() {
            EngineState::OneSelected
        } else {
            EngineState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state().is_busy()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Select the card at `index` (row-major).
    ///
    /// Out-of-range, matched or already face-up cards are ignored, as is any
    /// selection while a pair is pending or after the board is cleared.
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        let state = self.state();
        if state.is_busy() || state.is_complete() {
            return SelectOutcome::Ignored;
        }

        match self.cards.get(index) {
            Some(card) if card.selectable() => {}
            _ => return SelectOutcome::Ignored,
        }

        self.cards[index].flip_up();
        self.events.push(GameEvent::Flipped { index });
        self.clock_running = true;

        if self.first.is_none() {
            self.first = Some(index);
            log::debug!("card {} selected first", index);
            SelectOutcome::FirstSelected
        } else {
            self.second = Some(index);
            self.eval_timer.start(self.config.match_delay_ms);
            log::debug!("card {} selected second, evaluating", index);
            SelectOutcome::Evaluating
        }
    }

    /// Advance the clock and the evaluation delay by `elapsed_ms`.
    ///
    /// Returns the judgement when the pending pair resolves on this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<Resolution> {
        if self.clock_running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(elapsed_ms));
        }

        if self.eval_timer.tick(elapsed_ms) {
            self.resolve_pair()
        } else {
            None
        }
    }

    fn resolve_pair(&mut self) -> Option<Resolution> {
        let (Some(a), Some(b)) = (self.first.take(), self.second.take()) else {
            return None;
        };

        self.tracker.add_turn();

        if self.cards[a].id != self.cards[b].id {
            self.cards[a].flip_down();
            self.cards[b].flip_down();
            self.tracker.break_combo();
            self.events.push(GameEvent::Mismatched);
            log::debug!("cards {} and {} do not match", a, b);
            return Some(Resolution::Mismatch);
        }

        self.cards[a].mark_matched();
        self.cards[b].mark_matched();
        self.matched_pairs += 1;

        let points = self.tracker.record_match(self.config.base_points);
        let combo = self.tracker.combo();
        self.events.push(GameEvent::Matched { combo, points });
        log::debug!(
            "cards {} and {} match (combo {}, +{} points)",
            a,
            b,
            combo,
            points
        );

        let completed = self.matched_pairs >= self.total_pairs;
        if completed {
            self.complete = true;
            self.clock_running = false;
            self.events.push(GameEvent::GameOver {
                score: self.score(),
                turns: self.turns(),
                elapsed_secs: self.elapsed_secs(),
            });
            log::info!(
                "board cleared: score {}, turns {}, {:.1}s",
                self.score(),
                self.turns(),
                self.elapsed_secs()
            );
        }

        Some(Resolution::Match {
            combo,
            points,
            completed,
        })
    }

    /// Force the engine back to an untouched board with zeroed counters.
    ///
    /// Cancels a pending evaluation so it can never resolve against the reset
    /// state, and stops the clock until the next selection. The deck order is
    /// kept.
    pub fn reset(&mut self) {
        self.eval_timer.cancel();
        self.first = None;
        self.second = None;
        self.tracker.reset();
        self.matched_pairs = 0;
        self.elapsed_ms = 0;
        self.clock_running = false;
        self.complete = false;
        self.events.clear();
        for card in &mut self.cards {
            *card = Card::new(card.id);
        }
    }

    /// Take and clear queued events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Persistable projection of the current board.
    pub fn save_record(&self) -> SaveRecord {
        let matched_ids: BTreeSet<CardId> = self
            .cards
            .iter()
            .filter(|card| card.matched)
            .map(|card| card.id)
            .collect();

        SaveRecord {
            score: self.score(),
            turns: self.turns(),
            elapsed_time: self.elapsed_secs(),
            rows: self.rows,
            columns: self.columns,
            combo: self.combo(),
            matched_ids: matched_ids.into_iter().collect(),
            shuffled_deck: self.cards.iter().map(|card| card.id).collect(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.rows;
        out.columns = self.columns;
        out.cards.clear();
        out.cards.extend_from_slice(&self.cards);
        out.score = self.score();
        out.turns = self.turns();
        out.combo = self.combo();
        out.matched_pairs = self.matched_pairs;
        out.total_pairs = self.total_pairs;
        out.elapsed_ms = self.elapsed_ms;
        out.state = self.state();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn secs_to_ms(secs: f32) -> u64 {
    // NaN and negatives clamp to zero.
    (secs.max(0.0) * 1000.0).round() as u64
}
