use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    #[default]
    Normal,
    Highlight,
}

/// One contiguous run of the input text.
///
/// Alphabetic runs always carry their canonical form and an `ordinal`, the
/// position of the word among all words of the same highlighting pass.
/// Separator runs carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Segment {
    pub text: String,
    pub tag: Tag,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ordinal: Option<usize>,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: Tag::Normal,
            canonical: None,
            ordinal: None,
        }
    }

    pub fn word(text: impl Into<String>, canonical: String, ordinal: usize, in_bank: bool) -> Self {
        Self {
            text: text.into(),
            tag: if in_bank { Tag::Highlight } else { Tag::Normal },
            canonical: Some(canonical),
            ordinal: Some(ordinal),
        }
    }

    pub fn is_highlight(&self) -> bool {
        self.tag == Tag::Highlight
    }

    pub fn is_word(&self) -> bool {
        self.ordinal.is_some()
    }

    /// Reference a presentation layer can attach to this word for lookup.
    pub fn word_ref(&self) -> Option<WordRef> {
        Some(WordRef {
            lemma: self.canonical.clone()?,
            ordinal: self.ordinal?,
            in_bank: self.is_highlight(),
        })
    }
}

/// Rebuilds the original text from its segments.
pub fn concat(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Identity of one highlighted-or-not word, rendered as `lemma_N_IN` or
/// `lemma_N_OUT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct WordRef {
    pub lemma: String,
    pub ordinal: usize,
    pub in_bank: bool,
}

impl fmt::Display for WordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.in_bank { "IN" } else { "OUT" };
        write!(f, "{}_{}_{}", self.lemma, self.ordinal, status)
    }
}

impl FromStr for WordRef {
    type Err = std::convert::Infallible;

    /// A reference without three `_`-separated parts is taken as a bare
    /// lemma already in the bank; an unreadable ordinal becomes 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.rsplitn(3, '_').collect();
        if let &[status, ordinal, lemma] = parts.as_slice() {
            return Ok(WordRef {
                lemma: lemma.to_string(),
                ordinal: ordinal.parse().unwrap_or(0),
                in_bank: status == "IN",
            });
        }
        Ok(WordRef {
            lemma: s.to_string(),
            ordinal: 0,
            in_bank: true,
        })
    }
}
