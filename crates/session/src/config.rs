use crate::core::EngineConfig;

/// Settings for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Grid rows for new games.
    pub rows: u16,
    /// Grid columns for new games.
    pub columns: u16,
    /// Fixed shuffle seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub engine: EngineConfig,
}

impl SessionConfig {
    pub fn with_grid(mut self, rows: u16, columns: u16) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            columns: 4,
            seed: None,
            engine: EngineConfig::default(),
        }
    }
}
