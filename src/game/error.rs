use thiserror::Error;

/// Fatal engine errors. Ordinary play never produces these; collisions and
/// losses are game state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// No free cell for new food was found within the retry cap
    #[error("no free cell found for food after {attempts} attempts")]
    SpawnExhausted { attempts: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
