use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid prompt pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("prompt pattern {0:?} has no capturing group")]
    MissingCaptureGroup(String),

    #[error("failed to read heuristics file {path}: {source}")]
    HeuristicsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse heuristics file: {0}")]
    HeuristicsFileParse(#[from] serde_yaml::Error),
}
