use std::io;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to save word bank to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load word bank from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to import text from {}: {source}", path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failures raised by a [`LemmaModel`](crate::model::LemmaModel).
///
/// The highlighter never propagates these; it falls back to the raw token.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read lemma table {}: {source}", path.display())]
    TableIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed lemma table {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tokenizer failed: {0}")]
    Tokenize(String),

    #[error("no alphabetic token in {0:?}")]
    NoToken(String),
}
