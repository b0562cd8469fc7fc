use crate::types::CardId;

/// A single board cell.
///
/// Cards start face-down. A matched card stays face-up for the rest of the
/// round and never accepts selection again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub flipped: bool,
    pub matched: bool,
}

impl Card {
    pub fn new(id: CardId) -> Self {
        Self {
            id,
            flipped: false,
            matched: false,
        }
    }

    /// A card restored as already matched.
    pub fn resolved(id: CardId) -> Self {
        Self {
            id,
            flipped: true,
            matched: true,
        }
    }

    /// Whether the card may be picked.
    pub fn selectable(&self) -> bool {
        !self.flipped && !self.matched
    }

    pub(crate) fn flip_up(&mut self) {
        self.flipped = true;
    }

    pub(crate) fn flip_down(&mut self) {
        if !self.matched {
            self.flipped = false;
        }
    }

    pub(crate) fn mark_matched(&mut self) {
        self.flipped = true;
        self.matched = true;
    }
}
