//! Game session - the single live game and its save slot
//!
//! A session owns the match engine, the deck generator and the persistence
//! store, and is what the host application talks to. It decides between
//! resuming and dealing fresh, and snapshots progress after every matched
//! pair.

use crate::config::SessionConfig;
use crate::core::{
    DefaultGridGenerator, GameSnapshot, GridGenerator, MatchEngine, Resolution, SelectOutcome,
};
use crate::error::Result;
use crate::store::{KeyValueStore, PersistenceStore};
use crate::types::GameEvent;

/// How a session got its current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartKind {
    Fresh,
    Resumed,
}

pub struct GameSession<S> {
    config: SessionConfig,
    generator: DefaultGridGenerator,
    persistence: PersistenceStore<S>,
    engine: MatchEngine,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Create a session with a freshly dealt board of the configured size.
    ///
    /// The store is not read or written until a game is started or resumed.
    pub fn new(config: SessionConfig, store: S) -> Result<Self> {
        let mut generator = match config.seed {
            Some(seed) => GridGenerator::seeded(seed),
            None => GridGenerator::from_entropy(),
        };
        let deck = generator.generate(config.rows, config.columns)?;
        let engine = MatchEngine::new(config.rows, config.columns, &deck, config.engine)?;

        Ok(Self {
            config,
            generator,
            persistence: PersistenceStore::new(store),
            engine,
        })
    }

    /// Deal a new `rows x columns` board and drop any existing save.
    ///
    /// An invalid grid leaves the current board untouched. If clearing the
    /// old save fails the new board is still in play and the error is
    /// returned.
    pub fn new_game(&mut self, rows: u16, columns: u16) -> Result<()> {
        self.deal(rows, columns)?;
        self.persistence.clear()?;
        Ok(())
    }

    fn deal(&mut self, rows: u16, columns: u16) -> Result<()> {
        let deck = self.generator.generate(rows, columns)?;
        self.engine = MatchEngine::new(rows, columns, &deck, self.config.engine)?;
        self.config.rows = rows;
        self.config.columns = columns;
        log::info!("new {}x{} game", rows, columns);
        Ok(())
    }

    /// Resume the saved game if there is a usable one, else deal a new board
    /// of the configured size.
    ///
    /// An unusable save is dropped on the way; failing to drop it is logged,
    /// not returned, since the fresh board is already in play.
    pub fn resume_or_new_game(&mut self) -> Result<StartKind> {
        match self.load_saved_engine() {
            Some(engine) => {
                self.config.rows = engine.rows();
                self.config.columns = engine.columns();
                self.engine = engine;
                log::info!(
                    "resumed {}x{} game at score {}",
                    self.config.rows,
                    self.config.columns,
                    self.engine.score()
                );
                Ok(StartKind::Resumed)
            }
            None => {
                self.deal(self.config.rows, self.config.columns)?;
                if let Err(err) = self.persistence.clear() {
                    log::warn!("could not drop the old save: {}", err);
                }
                Ok(StartKind::Fresh)
            }
        }
    }

    fn load_saved_engine(&self) -> Option<MatchEngine> {
        match self.persistence.has_save() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(err) => {
                log::warn!("could not check for a save, starting fresh: {}", err);
                return None;
            }
        }

        let record = match self.persistence.load() {
            Ok(record) => record,
            Err(err) => {
                log::warn!("save is unreadable, starting fresh: {}", err);
                return None;
            }
        };
        if record.shuffled_deck.is_empty() {
            log::warn!("save has no deck, starting fresh");
            return None;
        }

        match MatchEngine::from_save(&record, self.config.engine) {
            Ok(engine) if engine.is_complete() => {
                log::warn!("save holds a finished board, starting fresh");
                None
            }
            Ok(engine) => Some(engine),
            Err(err) => {
                log::warn!("save does not describe a valid board, starting fresh: {}", err);
                None
            }
        }
    }

    /// Select the card at `index` (row-major position on the grid).
    pub fn select_card(&mut self, index: usize) -> SelectOutcome {
        self.engine.select(index)
    }

    /// Advance time by `elapsed_ms`, judging a pending pair when its delay
    /// runs out.
    ///
    /// A matched pair is saved; clearing the board removes the save. When the
    /// save fails the board has still advanced and the queued events still
    /// describe the resolution; only the error is returned.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Option<Resolution>> {
        let resolution = self.engine.tick(elapsed_ms);

        match resolution {
            Some(Resolution::Match {
                completed: false, ..
            }) => self.persistence.save(&self.engine.save_record())?,
            Some(Resolution::Match {
                completed: true, ..
            }) => self.persistence.clear()?,
            Some(Resolution::Mismatch) | None => {}
        }

        Ok(resolution)
    }

    /// Zero the counters and return the board to face-down without touching
    /// the save.
    pub fn reset_game(&mut self) {
        self.engine.reset();
        log::debug!("game reset");
    }

    /// Abandon the current board and its save, and deal one of the same size.
    pub fn restart(&mut self) -> Result<()> {
        self.reset_game();
        self.new_game(self.engine.rows(), self.engine.columns())
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.engine.take_events()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn persistence(&self) -> &PersistenceStore<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut PersistenceStore<S> {
        &mut self.persistence
    }

    pub fn rows(&self) -> u16 {
        self.engine.rows()
    }

    pub fn columns(&self) -> u16 {
        self.engine.columns()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn turns(&self) -> u32 {
        self.engine.turns()
    }

    pub fn combo(&self) -> u32 {
        self.engine.combo()
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.engine.elapsed_secs()
    }

    pub fn is_busy(&self) -> bool {
        self.engine.is_busy()
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.engine.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }
}
