//! Lemma models: the pluggable alternative to the rule-based fallback.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use crate::error::ModelError;

/// One alphabetic token reported by a [`LemmaModel`].
///
/// `start` and `end` are byte offsets into the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub lemma: String,
}

/// A full-fidelity lemmatizer that owns its own tokenization.
pub trait LemmaModel: Send + Sync {
    /// Returns every alphabetic token of `text` with its lemma, in order.
    fn analyze(&self, text: &str) -> Result<Vec<AnalyzedToken>, ModelError>;

    /// Lemma of a single word.
    fn lemma(&self, word: &str) -> Result<String, ModelError> {
        self.analyze(word)?
            .into_iter()
            .next()
            .map(|tk| tk.lemma)
            .ok_or_else(|| ModelError::NoToken(word.to_string()))
    }
}

/// Lemma model backed by a surface-form -> lemma table.
///
/// Tokenization splits negative contractions the way trained English
/// tokenizers do (`"don't"` becomes `"do"` + `"n't"`); the `n't` half is not
/// alphabetic and is never reported. Words missing from the table are their
/// own lemma.
pub struct DictionaryModel {
    lemmas: HashMap<String, String>,
    token_regex: Regex,
}

impl DictionaryModel {
    pub fn new(lemmas: HashMap<String, String>) -> Self {
        let lemmas = lemmas
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_lowercase()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .collect();

        // Static pattern; failing to compile it is a programming error.
        let token_regex = Regex::new(r"(?x)
            \p{L}+?(?=n['’]t\b) |
            n['’]t\b |
            \p{L}+
        ").expect("token pattern is valid");

        Self { lemmas, token_regex }
    }

    /// Parses a JSON object of `{"surface": "lemma"}` pairs.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, ModelError> {
        let lemmas: HashMap<String, String> =
            serde_json::from_str(json).map_err(|source| ModelError::Table {
                path: origin.to_path_buf(),
                source,
            })?;
        Ok(Self::new(lemmas))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ModelError::TableIo {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json(&json, path)?;
        tracing::info!("loaded {} lemma entries from {}", model.len(), path.display());
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    fn lookup(&self, surface: &str) -> String {
        let lower = surface.to_lowercase();
        match self.lemmas.get(&lower) {
            Some(lemma) => lemma.clone(),
            None => lower,
        }
    }
}

impl LemmaModel for DictionaryModel {
    fn analyze(&self, text: &str) -> Result<Vec<AnalyzedToken>, ModelError> {
        let mut tokens = Vec::new();
        for mat in self.token_regex.find_iter(text) {
            let m = mat.map_err(|e| ModelError::Tokenize(e.to_string()))?;
            let surface = m.as_str();
            if !surface.chars().all(char::is_alphabetic) {
                continue;
            }
            tokens.push(AnalyzedToken {
                start: m.start(),
                end: m.end(),
                text: surface.to_string(),
                lemma: self.lookup(surface),
            });
        }
        Ok(tokens)
    }
}
