use thiserror::Error;

use crate::core::GridError;
use crate::store::PersistenceError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Could not persist progress: {0}")]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
