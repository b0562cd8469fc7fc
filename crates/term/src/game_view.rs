//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Card, GameSnapshot};
use crate::fb::{BoxChars, CellStyle, FrameBuffer, Rgb};
use crate::types::CardId;

/// Glyphs printed on face-up cards, picked by `id % FACES.len()`.
pub const FACES: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

const FACE_COLORS: [Rgb; 6] = [
    Rgb::new(80, 220, 220),
    Rgb::new(240, 220, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(100, 220, 120),
    Rgb::new(220, 80, 80),
    Rgb::new(255, 165, 0),
];

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const TABLE: Rgb = Rgb::new(30, 30, 40);

/// Glyph for a card id.
pub fn face_for(id: CardId) -> char {
    FACES[id as usize % FACES.len()]
}

fn face_color(id: CardId) -> Rgb {
    FACE_COLORS[id as usize % FACE_COLORS.len()]
}

/// Elapsed play time as `"{m}m {s}s"`, or `"{s}s"` under a minute.
pub fn format_elapsed(secs: f32) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    let (minutes, seconds) = (total / 60, total % 60);
    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Host-side state drawn over the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud<'a> {
    /// Highlighted `(row, column)`.
    pub cursor: Option<(u16, u16)>,
    /// One-line message under the counters.
    pub message: Option<&'a str>,
}

/// Renders the card grid, counters and the game-over banner.
pub struct GameView {
    /// Card width in terminal columns, border included.
    card_w: u16,
    /// Card height in terminal rows, border included.
    card_h: u16,
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            card_w: 5,
            card_h: 3,
            gap: 1,
        }
    }
}

impl GameView {
    /// Card sizes below 3x3 leave no room for the face and are raised to it.
    pub fn new(card_w: u16, card_h: u16, gap: u16) -> Self {
        Self {
            card_w: card_w.max(3),
            card_h: card_h.max(3),
            gap,
        }
    }

    /// Board size in terminal cells for a `rows x columns` grid.
    pub fn board_size(&self, rows: u16, columns: u16) -> (u16, u16) {
        let span = |count: u16, size: u16| {
            count
                .saturating_mul(size)
                .saturating_add(count.saturating_sub(1).saturating_mul(self.gap))
        };
        (span(columns, self.card_w), span(rows, self.card_h))
    }

    /// Top-left corner of the card at `(row, column)`, relative to the board.
    fn card_origin(&self, row: u16, column: u16) -> (u16, u16) {
        (
            column.saturating_mul(self.card_w.saturating_add(self.gap)),
            row.saturating_mul(self.card_h.saturating_add(self.gap)),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: Hud<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let title = CellStyle::new(Rgb::new(220, 220, 220), BACKGROUND).bold();
        fb.put_str_centered(0, 0, viewport.width, "CONCENTRATION", title);

        let (board_w, board_h) = self.board_size(snap.rows, snap.columns);
        let start_x = viewport.width.saturating_sub(board_w) / 2;
        let start_y: u16 = 2;

        for row in 0..snap.rows {
            for column in 0..snap.columns {
                let Some(card) = snap.card_at(row, column) else {
                    continue;
                };
                let (dx, dy) = self.card_origin(row, column);
                let highlighted = hud.cursor == Some((row, column));
                self.draw_card(
                    fb,
                    start_x.saturating_add(dx),
                    start_y.saturating_add(dy),
                    card,
                    highlighted,
                );
            }
        }

        let status_y = start_y.saturating_add(board_h).saturating_add(1);
        self.draw_status(fb, snap, hud.message, viewport, status_y);

        if snap.state.is_complete() {
            self.draw_game_over(fb, snap, start_x, start_y, board_w, board_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_card(&self, fb: &mut FrameBuffer, x: u16, y: u16, card: &Card, highlighted: bool) {
        let inner_w = self.card_w - 2;
        let inner_h = self.card_h - 2;

        let (border, chars) = if highlighted {
            (CellStyle::new(Rgb::new(255, 230, 90), BACKGROUND).bold(), BoxChars::HEAVY)
        } else if card.matched {
            (CellStyle::new(Rgb::new(90, 160, 90), BACKGROUND).dim(), BoxChars::LIGHT)
        } else {
            (CellStyle::new(Rgb::new(170, 170, 180), BACKGROUND), BoxChars::LIGHT)
        };
        fb.draw_box(x, y, self.card_w, self.card_h, chars, border);

        if card.flipped {
            let face = CellStyle::new(face_color(card.id), TABLE);
            let face = if card.matched { face.dim() } else { face.bold() };
            fb.fill_rect(x.saturating_add(1), y.saturating_add(1), inner_w, inner_h, ' ', face);
            fb.put_char(
                x.saturating_add(self.card_w / 2),
                y.saturating_add(self.card_h / 2),
                face_for(card.id),
                face,
            );
        } else {
            let back = CellStyle::new(Rgb::new(90, 90, 110), TABLE);
            fb.fill_rect(x.saturating_add(1), y.saturating_add(1), inner_w, inner_h, '░', back);
        }
    }

    fn draw_status(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        message: Option<&str>,
        viewport: Viewport,
        y: u16,
    ) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), BACKGROUND).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND);

        let counters = format!(
            "SCORE {}  TURNS {}  COMBO x{}",
            snap.score, snap.turns, snap.combo
        );
        fb.put_str_centered(0, y, viewport.width, &counters, label);

        let progress = format!(
            "PAIRS {}/{}  TIME {}",
            snap.matched_pairs,
            snap.total_pairs,
            format_elapsed(snap.elapsed_secs())
        );
        fb.put_str_centered(0, y.saturating_add(1), viewport.width, &progress, value);

        if let Some(message) = message {
            fb.put_str_centered(0, y.saturating_add(3), viewport.width, message, value.dim());
        }

        let help = "arrows/hjkl move  enter select  r restart  q quit";
        let help_y = viewport.height.saturating_sub(1);
        if help_y > y.saturating_add(3) {
            fb.put_str_centered(0, help_y, viewport.width, help, value.dim());
        }
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        board_w: u16,
        board_h: u16,
    ) {
        let banner = CellStyle::new(Rgb::new(255, 255, 255), BACKGROUND).bold();
        let mid_y = start_y.saturating_add(board_h / 2);
        let summary = format!(
            "{} points in {} turns, {}",
            snap.score,
            snap.turns,
            format_elapsed(snap.elapsed_secs())
        );
        let width = board_w.max((summary.chars().count() as u16).saturating_add(2));
        let x = start_x.saturating_sub(width.saturating_sub(board_w) / 2);

        fb.fill_rect(x, mid_y.saturating_sub(1), width, 3, ' ', banner);
        fb.put_str_centered(x, mid_y.saturating_sub(1), width, "ALL PAIRS FOUND", banner);
        fb.put_str_centered(x, mid_y, width, &summary, banner);
        fb.put_str_centered(x, mid_y.saturating_add(1), width, "press r to play again", banner.dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineState;

    fn snapshot() -> GameSnapshot {
        let mut cards: Vec<Card> = [0, 1, 0, 1].into_iter().map(Card::new).collect();
        cards[0].flipped = true;
        GameSnapshot {
            rows: 2,
            columns: 2,
            cards,
            total_pairs: 2,
            elapsed_ms: 75_000,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "0s");
        assert_eq!(format_elapsed(59.9), "59s");
        assert_eq!(format_elapsed(60.0), "1m 0s");
        assert_eq!(format_elapsed(125.4), "2m 5s");
        assert_eq!(format_elapsed(-3.0), "0s");
        assert_eq!(format_elapsed(f32::NAN), "0s");
    }

    #[test]
    fn test_faces_wrap_by_id() {
        assert_eq!(face_for(0), 'A');
        assert_eq!(face_for(25), 'Z');
        assert_eq!(face_for(36), 'A');
    }

    #[test]
    fn test_board_size() {
        let view = GameView::default();
        assert_eq!(view.board_size(2, 2), (11, 7));
        assert_eq!(view.board_size(4, 4), (23, 15));
        assert_eq!(view.board_size(0, 0), (0, 0));
    }

    #[test]
    fn test_face_up_and_face_down_cards() {
        let view = GameView::default();
        let fb = view.render(&snapshot(), Hud::default(), Viewport::new(40, 16));

        // Board is 11 wide, centred at x = 14, top at y = 2.
        assert_eq!(fb.get(16, 3).map(|c| c.ch), Some('A'));
        assert_eq!(fb.get(22, 3).map(|c| c.ch), Some('░'));
        assert_eq!(fb.get(14, 2).map(|c| c.ch), Some('┌'));
    }

    #[test]
    fn test_cursor_uses_heavy_border() {
        let view = GameView::default();
        let hud = Hud {
            cursor: Some((1, 1)),
            message: None,
        };
        let fb = view.render(&snapshot(), hud, Viewport::new(40, 16));
        assert_eq!(fb.get(20, 6).map(|c| c.ch), Some('┏'));
        assert_eq!(fb.get(14, 6).map(|c| c.ch), Some('┌'));
    }

    #[test]
    fn test_status_lines() {
        let view = GameView::default();
        let mut snap = snapshot();
        snap.score = 30;
        snap.turns = 2;
        snap.combo = 2;
        let hud = Hud {
            cursor: None,
            message: Some("Match! +20"),
        };
        let fb = view.render(&snap, hud, Viewport::new(40, 16));

        assert!(fb.row_text(10).contains("SCORE 30  TURNS 2  COMBO x2"));
        assert!(fb.row_text(11).contains("PAIRS 0/2  TIME 1m 15s"));
        assert!(fb.row_text(13).contains("Match! +20"));
    }

    #[test]
    fn test_game_over_banner() {
        let view = GameView::default();
        let mut snap = snapshot();
        snap.state = EngineState::Complete;
        let fb = view.render(&snap, Hud::default(), Viewport::new(40, 16));

        let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.iter().any(|row| row.contains("ALL PAIRS FOUND")));
        assert!(text.iter().any(|row| row.contains("0 points in 0 turns, 1m 15s")));
    }

    #[test]
    fn test_huge_grid_is_clipped_without_overflow() {
        let view = GameView::default();
        let snap = GameSnapshot {
            rows: 11_000,
            columns: 2,
            cards: (0..22_000).map(|i| Card::new(i / 2)).collect(),
            total_pairs: 11_000,
            ..GameSnapshot::default()
        };
        let hud = Hud {
            cursor: Some((10_999, 1)),
            message: None,
        };
        let fb = view.render(&snap, hud, Viewport::new(40, 16));
        assert_eq!(fb.get(14, 2).map(|c| c.ch), Some('┌'));

        let wide = GameView::new(u16::MAX, u16::MAX, u16::MAX);
        assert_eq!(wide.card_origin(2, 2), (u16::MAX, u16::MAX));
        assert_eq!(wide.board_size(3, 3), (u16::MAX, u16::MAX));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&snapshot(), Hud::default(), Viewport::new(3, 2));
        assert_eq!((fb.width(), fb.height()), (3, 2));
    }
}
