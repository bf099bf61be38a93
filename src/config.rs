use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::{ConfigError, Error, Result};

pub const DEFAULT_WORD_BANK: &str = "wordbank.txt";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Word bank file used by load/save when no explicit path is given.
    pub word_bank: PathBuf,
    /// JSON lemma table; the rule-based lemmatizer is used when unset.
    pub lemma_table: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_bank: PathBuf::from(DEFAULT_WORD_BANK),
            lemma_table: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let wrap = |source: ConfigError| Error::Config {
            path: path.to_path_buf(),
            source,
        };
        let json = fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        Self::from_json(&json).map_err(|e| wrap(e.into()))
    }

    /// Reads `path`, or returns the defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::from_file(path) {
            Err(Error::Config { source: ConfigError::Io(e), .. })
                if e.kind() == io::ErrorKind::NotFound =>
            {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }
}
