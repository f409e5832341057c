use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Target word must be exactly {expected} ASCII letters, got '{word}'")]
    InvalidWord { word: String, expected: usize },
    #[error("Speed factor must be a positive finite number, got {0}")]
    InvalidSpeed(f64),
    #[error("Reveal stagger must be longer than zero")]
    ZeroStagger,
    #[error("Tile state must commit before the next tile starts flipping")]
    CommitAfterNextFlip,
    #[error("Reveal must settle after the last tile commits")]
    SettleBeforeLastCommit,
    #[error("Navigation must happen after the last heart tile")]
    NavigateBeforeLastHeart,
}

pub type Result<T> = core::result::Result<T, ConfigError>;
