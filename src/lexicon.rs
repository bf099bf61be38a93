use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use crate::error::{Error, Result};

/// The user's word bank: a set of lowercase base-form words.
///
/// Input is trimmed and lowercased on the way in (`add`, `remove`, `load`);
/// lookups compare against stored members as-is. Iteration is always in
/// lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: BTreeSet<String>,
}

fn clean(word: &str) -> String {
    word.trim().to_lowercase()
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::new();
        for word in words {
            lexicon.add(word.as_ref());
        }
        lexicon
    }

    /// Adds `word`, returning the stored form, or `None` if it was blank.
    pub fn add(&mut self, word: &str) -> Option<String> {
        let word = clean(word);
        if word.is_empty() {
            return None;
        }
        self.words.insert(word.clone());
        Some(word)
    }

    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(&clean(word))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Members containing `keyword` as a substring, in sorted order.
    pub fn search(&self, keyword: &str) -> Vec<&str> {
        let keyword = clean(keyword);
        self.words().filter(|w| w.contains(keyword.as_str())).collect()
    }

    /// Zero-based position of `word` in the sorted listing.
    pub fn locate(&self, word: &str) -> Option<usize> {
        let word = clean(word);
        self.words().position(|w| w == word)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = String::new();
        for word in self.words() {
            out.push_str(word);
            out.push('\n');
        }
        fs::write(path, out).map_err(|source| Error::Save {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("saved {} words to {}", self.len(), path.display());
        Ok(())
    }

    /// Replaces the whole word set with the contents of `path`.
    ///
    /// The file is read completely before anything is replaced, so on error
    /// the current words are kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let words: BTreeSet<String> = contents
            .lines()
            .map(clean)
            .filter(|w| !w.is_empty())
            .collect();
        self.words = words;
        tracing::info!("loaded {} words from {}", self.len(), path.display());
        Ok(self.len())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut lexicon = Self::new();
        lexicon.load(path)?;
        Ok(lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_normalizes_and_is_idempotent() {
        let mut lex = Lexicon::new();
        assert_eq!(lex.add("  Apple "), Some("apple".to_string()));
        let once = lex.clone();
        assert_eq!(lex.add("apple"), Some("apple".to_string()));
        assert_eq!(lex, once);
        assert!(lex.contains("apple"));
        assert!(!lex.contains("Apple"));
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut lex = Lexicon::new();
        assert_eq!(lex.add("   "), None);
        assert_eq!(lex.add(""), None);
        assert!(lex.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut lex = Lexicon::from_words(["run", "walk"]);
        assert!(!lex.remove("swim"));
        assert_eq!(lex.len(), 2);
        assert!(lex.remove(" RUN "));
        assert!(!lex.contains("run"));
        assert!(!lex.remove("run"));
    }

    #[test]
    fn test_words_sorted() {
        let lex = Lexicon::from_words(["pear", "apple", "fig", "Banana"]);
        let words: Vec<&str> = lex.words().collect();
        assert_eq!(words, ["apple", "banana", "fig", "pear"]);
    }

    #[test]
    fn test_search_and_locate() {
        let lex = Lexicon::from_words(["running", "run", "sprint", "rune"]);
        assert_eq!(lex.search("RUN"), ["run", "rune", "running"]);
        assert_eq!(lex.search("xyz"), Vec::<&str>::new());
        assert_eq!(lex.search("").len(), 4);
        assert_eq!(lex.locate("run"), Some(0));
        assert_eq!(lex.locate("Sprint"), Some(3));
        assert_eq!(lex.locate("walk"), None);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.txt");
        let lex = Lexicon::from_words(["zebra", "apple", "mango"]);
        lex.save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "apple\nmango\nzebra\n");

        let loaded = Lexicon::from_file(&path).unwrap();
        assert_eq!(loaded, lex);
    }

    #[test]
    fn test_load_cleans_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.txt");
        fs::write(&path, "  Apple \n\n\tapple\nPEAR\n   \n").unwrap();
        let mut lex = Lexicon::from_words(["old"]);
        assert_eq!(lex.load(&path).unwrap(), 2);
        let words: Vec<&str> = lex.words().collect();
        assert_eq!(words, ["apple", "pear"]);
    }

    #[test]
    fn test_failed_load_keeps_words() {
        let dir = tempfile::tempdir().unwrap();
        let mut lex = Lexicon::from_words(["keep", "these"]);
        let before = lex.clone();
        let err = lex.load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert_eq!(lex, before);
    }

    #[test]
    fn test_failed_load_on_invalid_utf8_keeps_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.txt");
        fs::write(&path, [0x61, 0xff, 0xfe, 0x0a]).unwrap();
        let mut lex = Lexicon::from_words(["keep"]);
        assert!(lex.load(&path).is_err());
        assert!(lex.contains("keep"));
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let lex = Lexicon::from_words(["word"]);
        let err = lex.save(dir.path().join("no/such/dir/bank.txt")).unwrap_err();
        assert!(matches!(err, Error::Save { .. }));
    }
}
