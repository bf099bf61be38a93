//! Typed command model over a word bank.
//!
//! A presentation layer turns user gestures into [`Action`]s, hands them to
//! [`Session::dispatch`], and renders the resulting [`Event`]. The session
//! holds no widgets and does no prompting of its own.

use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::highlight::{Highlighter, PARAGRAPH_BREAK};
use crate::lexicon::Lexicon;
use crate::normalizer::Normalizer;
use crate::token::Segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Remove(String),
    List,
    Search(String),
    Locate(String),
    Highlight(String),
    /// Save to the given path, or the configured word bank file.
    Save(Option<PathBuf>),
    /// Load from the given path, or the configured word bank file.
    Load(Option<PathBuf>),
    Import(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Added { word: String },
    AlreadyPresent { word: String },
    Removed { word: String },
    NotInBank { word: String },
    /// Blank or non-alphabetic input to add/remove.
    InvalidWord { input: String },
    Words { words: Vec<String> },
    Matches { keyword: String, words: Vec<String> },
    /// `position` is 1-based, as shown to the user.
    Located { word: String, position: usize },
    Highlighted { segments: Vec<Segment> },
    Saved { path: PathBuf, count: usize },
    NothingToSave,
    Loaded { path: PathBuf, count: usize },
    Imported { path: PathBuf, encoding: Encoding, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    Utf8,
    /// GBK, which also covers GB2312 text.
    Gbk,
    Latin1,
}

/// Owns one word bank and the normalizer chosen for it.
#[derive(Debug)]
pub struct Session {
    lexicon: Lexicon,
    normalizer: Normalizer,
    config: Config,
}

impl Session {
    pub fn new(lexicon: Lexicon, normalizer: Normalizer, config: Config) -> Self {
        Self { lexicon, normalizer, config }
    }

    /// Empty word bank, normalizer picked from `config`.
    pub fn from_config(config: Config) -> Self {
        let normalizer = Normalizer::from_config(&config);
        Self::new(Lexicon::new(), normalizer, config)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn highlighter(&self) -> Highlighter<'_> {
        Highlighter::new(&self.lexicon, &self.normalizer)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Event> {
        tracing::debug!(?action, "dispatch");
        let event = match action {
            Action::Add(input) => self.add(input),
            Action::Remove(input) => self.remove(input),
            Action::List => Event::Words { words: owned(self.lexicon.words()) },
            Action::Search(keyword) => {
                let words = owned(self.lexicon.search(&keyword));
                Event::Matches { keyword, words }
            }
            Action::Locate(input) => {
                let word = input.trim().to_lowercase();
                match self.lexicon.locate(&word) {
                    Some(index) => Event::Located { word, position: index + 1 },
                    None => Event::NotInBank { word },
                }
            }
            Action::Highlight(text) => Event::Highlighted {
                segments: self.highlighter().highlight(&text),
            },
            Action::Save(path) => {
                let path = path.unwrap_or_else(|| self.config.word_bank.clone());
                if self.lexicon.is_empty() {
                    Event::NothingToSave
                } else {
                    self.lexicon.save(&path)?;
                    Event::Saved { path, count: self.lexicon.len() }
                }
            }
            Action::Load(path) => {
                let path = path.unwrap_or_else(|| self.config.word_bank.clone());
                let count = self.lexicon.load(&path)?;
                Event::Loaded { path, count }
            }
            Action::Import(path) => {
                let (text, encoding) = import_text(&path)?;
                Event::Imported { path, encoding, text }
            }
        };
        Ok(event)
    }

    fn add(&mut self, input: String) -> Event {
        if !is_word(&input) {
            return Event::InvalidWord { input };
        }
        let word = input.trim().to_lowercase();
        if self.lexicon.contains(&word) {
            return Event::AlreadyPresent { word };
        }
        match self.lexicon.add(&word) {
            Some(word) => Event::Added { word },
            None => Event::InvalidWord { input },
        }
    }

    fn remove(&mut self, input: String) -> Event {
        let word = input.trim().to_lowercase();
        if word.is_empty() {
            return Event::InvalidWord { input };
        }
        if self.lexicon.remove(&word) {
            Event::Removed { word }
        } else {
            Event::NotInBank { word }
        }
    }
}

fn owned<'w>(words: impl IntoIterator<Item = &'w str>) -> Vec<String> {
    words.into_iter().map(str::to_string).collect()
}

fn is_word(input: &str) -> bool {
    let word = input.trim();
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Reads a text document for highlighting.
///
/// Decoding tries UTF-8, then GBK, and finally Latin-1, which accepts any
/// byte sequence. Runs of blank lines collapse to a single blank line.
pub fn import_text(path: impl AsRef<Path>) -> Result<(String, Encoding)> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::Import {
        path: path.to_path_buf(),
        source,
    })?;
    let (text, encoding) = decode(bytes);
    let text = PARAGRAPH_BREAK.replace_all(&text, "\n\n").into_owned();
    tracing::info!("imported {} bytes from {} as {:?}", text.len(), path.display(), encoding);
    Ok((text, encoding))
}

fn decode(bytes: Vec<u8>) -> (String, Encoding) {
    let bytes = match String::from_utf8(bytes) {
        Ok(text) => return (text, Encoding::Utf8),
        Err(e) => e.into_bytes(),
    };
    match encoding_rs::GBK.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(text) => (text.into_owned(), Encoding::Gbk),
        None => (bytes.iter().copied().map(char::from).collect(), Encoding::Latin1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let unused = std::env::temp_dir().join("wordbank-session-unused.txt");
        Session::new(
            Lexicon::new(),
            Normalizer::rule_based(),
            Config { word_bank: unused, lemma_table: None },
        )
    }

    fn added(word: &str) -> Event {
        Event::Added { word: word.into() }
    }

    #[test]
    fn test_add_and_duplicates() {
        let mut s = session();
        assert_eq!(s.dispatch(Action::Add(" Run ".into())).unwrap(), added("run"));
        assert_eq!(
            s.dispatch(Action::Add("run".into())).unwrap(),
            Event::AlreadyPresent { word: "run".into() }
        );
        assert_eq!(s.lexicon().len(), 1);
    }

    #[test]
    fn test_add_rejects_non_words() {
        let mut s = session();
        for input in ["", "   ", "ice-cream", "r2d2"] {
            let event = s.dispatch(Action::Add(input.into())).unwrap();
            assert_eq!(event, Event::InvalidWord { input: input.into() });
        }
        assert!(s.lexicon().is_empty());
    }

    #[test]
    fn test_remove() {
        let mut s = session();
        s.dispatch(Action::Add("walk".into())).unwrap();
        assert_eq!(
            s.dispatch(Action::Remove("swim".into())).unwrap(),
            Event::NotInBank { word: "swim".into() }
        );
        assert_eq!(
            s.dispatch(Action::Remove("WALK".into())).unwrap(),
            Event::Removed { word: "walk".into() }
        );
        assert!(matches!(
            s.dispatch(Action::Remove(" ".into())).unwrap(),
            Event::InvalidWord { .. }
        ));
    }

    #[test]
    fn test_list_search_locate() {
        let mut s = session();
        for w in ["pear", "apple", "grape"] {
            s.dispatch(Action::Add(w.into())).unwrap();
        }
        assert_eq!(
            s.dispatch(Action::List).unwrap(),
            Event::Words { words: vec!["apple".into(), "grape".into(), "pear".into()] }
        );
        assert_eq!(
            s.dispatch(Action::Search("ap".into())).unwrap(),
            Event::Matches { keyword: "ap".into(), words: vec!["apple".into(), "grape".into()] }
        );
        assert_eq!(
            s.dispatch(Action::Locate("Pear".into())).unwrap(),
            Event::Located { word: "pear".into(), position: 3 }
        );
        assert_eq!(
            s.dispatch(Action::Locate(" Kiwi ".into())).unwrap(),
            Event::NotInBank { word: "kiwi".into() }
        );
    }

    #[test]
    fn test_highlight_reflects_bank() {
        let mut s = session();
        s.dispatch(Action::Add("box".into())).unwrap();
        let Event::Highlighted { segments } = s.dispatch(Action::Highlight("Two boxes".into())).unwrap()
        else {
            panic!("expected highlight");
        };
        assert!(segments[2].is_highlight());
        assert_eq!(segments[2].word_ref().unwrap().to_string(), "box_1_IN");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.txt");
        let mut s = session();
        assert_eq!(s.dispatch(Action::Save(Some(path.clone()))).unwrap(), Event::NothingToSave);
        assert!(!path.exists());

        s.dispatch(Action::Add("fire".into())).unwrap();
        s.dispatch(Action::Add("city".into())).unwrap();
        assert_eq!(
            s.dispatch(Action::Save(Some(path.clone()))).unwrap(),
            Event::Saved { path: path.clone(), count: 2 }
        );

        let mut fresh = session();
        assert_eq!(
            fresh.dispatch(Action::Load(Some(path.clone()))).unwrap(),
            Event::Loaded { path, count: 2 }
        );
        assert_eq!(fresh.lexicon(), s.lexicon());
    }

    #[test]
    fn test_load_failure_is_reported_and_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        s.dispatch(Action::Add("stay".into())).unwrap();
        let err = s.dispatch(Action::Load(Some(dir.path().join("nope.txt")))).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert!(s.lexicon().contains("stay"));
    }

    #[test]
    fn test_save_defaults_to_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.txt");
        let mut s = Session::new(
            Lexicon::from_words(["word"]),
            Normalizer::rule_based(),
            Config { word_bank: path.clone(), lemma_table: None },
        );
        assert_eq!(
            s.dispatch(Action::Save(None)).unwrap(),
            Event::Saved { path: path.clone(), count: 1 }
        );
        assert_eq!(fs::read_to_string(path).unwrap(), "word\n");
    }

    #[test]
    fn test_import_utf8_collapses_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "First.\n\n\n  \nSecond — ok.\n").unwrap();
        let (text, encoding) = import_text(&path).unwrap();
        assert_eq!(encoding, Encoding::Utf8);
        assert_eq!(text, "First.\n\nSecond — ok.\n");
    }

    #[test]
    fn test_import_latin1_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, b"caf\xe9 na\xefve").unwrap();
        let mut s = session();
        let event = s.dispatch(Action::Import(path.clone())).unwrap();
        assert_eq!(
            event,
            Event::Imported { path, encoding: Encoding::Latin1, text: "café naïve".into() }
        );
    }

    #[test]
    fn test_import_gbk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, b"\xc4\xe3\xba\xc3, run\n").unwrap();
        let (text, encoding) = import_text(&path).unwrap();
        assert_eq!(encoding, Encoding::Gbk);
        assert_eq!(text, "你好, run\n");
    }

    #[test]
    fn test_import_missing_file() {
        let err = import_text("/no/such/document.txt").unwrap_err();
        assert!(matches!(err, Error::Import { .. }));
    }
}
