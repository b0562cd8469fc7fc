use crate::card::Card;
use crate::engine::EngineState;

/// Read-only copy of a board and its counters, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub rows: u16,
    pub columns: u16,
    /// Cards in row-major display order.
    pub cards: Vec<Card>,
    pub score: u32,
    pub turns: u32,
    pub combo: u32,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub elapsed_ms: u64,
    pub state: EngineState,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.columns = 0;
        self.cards.clear();
        self.score = 0;
        self.turns = 0;
        self.combo = 0;
        self.matched_pairs = 0;
        self.total_pairs = 0;
        self.elapsed_ms = 0;
        self.state = EngineState::Idle;
    }

    pub fn card_at(&self, row: u16, column: u16) -> Option<&Card> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        let index = usize::from(row) * usize::from(self.columns) + usize::from(column);
        self.cards.get(index)
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ms as f32 / 1000.0
    }

    /// Whether new selections can currently be accepted.
    pub fn playable(&self) -> bool {
        !self.state.is_busy() && !self.state.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_at_is_row_major() {
        let snap = GameSnapshot {
            rows: 2,
            columns: 3,
            cards: (0..6).map(Card::new).collect(),
            ..GameSnapshot::default()
        };

        assert_eq!(snap.card_at(0, 2).map(|c| c.id), Some(2));
        assert_eq!(snap.card_at(1, 0).map(|c| c.id), Some(3));
        assert_eq!(snap.card_at(2, 0), None);
        assert_eq!(snap.card_at(0, 3), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut snap = GameSnapshot {
            rows: 2,
            columns: 2,
            cards: vec![Card::new(0); 4],
            score: 30,
            elapsed_ms: 1500,
            state: EngineState::Complete,
            ..GameSnapshot::default()
        };
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
        assert!(snap.playable());
    }
}
