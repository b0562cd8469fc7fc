//! Scoring module - match points, turns and the combo streak
//!
//! Only a match scores. An isolated match (streak of one) is worth the base
//! value; once the streak exceeds one the base is multiplied by it, so a run
//! of matches pays 10, 20, 30, ... with the default base.

/// Points for a match at streak `combo` (already counting this match).
pub fn points_for_match(base: u32, combo: u32) -> u32 {
    if combo > 1 {
        base.saturating_mul(combo)
    } else {
        base
    }
}

/// Score, turn and combo bookkeeping driven by the match engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
    turns: u32,
    combo: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker carrying over totals from a save.
    pub fn restored(score: u32, turns: u32, combo: u32) -> Self {
        Self {
            score,
            turns,
            combo,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn add_turn(&mut self) {
        self.turns = self.turns.saturating_add(1);
    }

    /// Extend the streak and award its points. Returns the points added.
    pub fn record_match(&mut self, base: u32) -> u32 {
        self.combo = self.combo.saturating_add(1);
        let points = points_for_match(base, self.combo);
        self.add_score(points);
        points
    }

    pub fn break_combo(&mut self) {
        self.combo = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
