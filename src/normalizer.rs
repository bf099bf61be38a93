use std::fmt;
use std::sync::Arc;
use crate::config::Config;
use crate::error::ModelError;
use crate::fallback::RuleBased;
use crate::model::{DictionaryModel, LemmaModel};

/// Reduces surface words to their canonical base form.
///
/// The strategy is picked once per session and never changes afterwards.
#[derive(Clone)]
pub enum Normalizer {
    RuleBased(RuleBased),
    External(Arc<dyn LemmaModel>),
}

impl Normalizer {
    pub fn rule_based() -> Self {
        Normalizer::RuleBased(RuleBased::new())
    }

    pub fn external(model: Arc<dyn LemmaModel>) -> Self {
        Normalizer::External(model)
    }

    /// Uses `model` when one is available, the rule set otherwise.
    pub fn select(model: Option<Arc<dyn LemmaModel>>) -> Self {
        match model {
            Some(model) => {
                tracing::debug!("using external lemma model");
                Normalizer::External(model)
            }
            None => {
                tracing::debug!("no lemma model configured, using rule-based lemmatizer");
                Normalizer::rule_based()
            }
        }
    }

    /// Loads the configured lemma table, falling back to the rule set when
    /// it is absent or cannot be read.
    pub fn from_config(config: &Config) -> Self {
        let model = config.lemma_table.as_ref().and_then(|path| {
            match DictionaryModel::from_file(path) {
                Ok(model) => Some(Arc::new(model) as Arc<dyn LemmaModel>),
                Err(e) => {
                    tracing::warn!("{e}; falling back to rule-based lemmatizer");
                    None
                }
            }
        });
        Self::select(model)
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Normalizer::External(_))
    }

    pub fn model(&self) -> Option<&dyn LemmaModel> {
        match self {
            Normalizer::External(model) => Some(model.as_ref()),
            Normalizer::RuleBased(_) => None,
        }
    }

    /// Lowercase canonical form of `word`, or the model's error.
    pub fn try_normalize(&self, word: &str) -> Result<String, ModelError> {
        match self {
            Normalizer::RuleBased(rules) => Ok(rules.lemmatize(word)),
            Normalizer::External(model) => model.lemma(word).map(|lemma| lemma.to_lowercase()),
        }
    }

    /// Like [`try_normalize`](Self::try_normalize), but a failing model
    /// yields the lowercased word itself.
    pub fn normalize(&self, word: &str) -> String {
        self.try_normalize(word).unwrap_or_else(|e| {
            tracing::warn!("lemma model failed for {word:?}: {e}");
            word.to_lowercase()
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::rule_based()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalizer::RuleBased(_) => f.write_str("Normalizer::RuleBased"),
            Normalizer::External(_) => f.write_str("Normalizer::External"),
        }
    }
}
