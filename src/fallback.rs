use crate::data;

/// Rule-based lemmatizer used when no lemma model is available.
///
/// Rules are tried in a fixed order and the first one that applies wins:
/// irregular table, `-ing`, `-ed`, then `-s`/`-es`/`-ies`. Anything else is
/// returned lowercased and otherwise unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleBased;

impl RuleBased {
    pub fn new() -> Self {
        Self
    }

    pub fn lemmatize(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if let Some(base) = data::irregular_verbs().get(&word) {
            return base.clone();
        }

        let chars: Vec<char> = word.chars().collect();
        stem_ing(&chars)
            .or_else(|| stem_ed(&chars))
            .or_else(|| stem_s(&chars))
            .unwrap_or(word)
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn ends_with(w: &[char], suffix: &str) -> bool {
    let suffix: Vec<char> = suffix.chars().collect();
    w.ends_with(&suffix)
}

fn collect(w: &[char]) -> String {
    w.iter().collect()
}

// A single vowel before a closing consonant, as in "mak" or "fir".
fn needs_silent_e(base: &[char]) -> bool {
    let n = base.len();
    if n < 2 {
        return false;
    }
    let single_vowel = n == 2 || !is_vowel(base[n - 3]);
    !is_vowel(base[n - 1]) && is_vowel(base[n - 2]) && single_vowel
}

fn restore_e(base: &[char]) -> String {
    let mut s = collect(base);
    if needs_silent_e(base) {
        s.push('e');
    }
    s
}

fn stem_ing(w: &[char]) -> Option<String> {
    let n = w.len();
    if n <= 5 || !ends_with(w, "ing") {
        return None;
    }
    // running -> run
    if n > 6 && w[n - 4] == w[n - 5] && !is_vowel(w[n - 4]) {
        return Some(collect(&w[..n - 4]));
    }
    Some(restore_e(&w[..n - 3]))
}

fn stem_ed(w: &[char]) -> Option<String> {
    let n = w.len();
    if n <= 4 || !ends_with(w, "ed") {
        return None;
    }
    if n > 5 && ends_with(w, "eed") {
        return Some(collect(&w[..n - 1]));
    }
    // stopped -> stop
    if n > 5 && w[n - 3] == w[n - 4] && !is_vowel(w[n - 3]) {
        return Some(collect(&w[..n - 3]));
    }
    Some(restore_e(&w[..n - 2]))
}

fn stem_s(w: &[char]) -> Option<String> {
    let n = w.len();
    if n <= 3 || !ends_with(w, "s") || ends_with(w, "ss") {
        return None;
    }
    if n > 4 && ends_with(w, "ies") {
        return Some(collect(&w[..n - 3]) + "y");
    }
    if ends_with(w, "es") {
        let base = &w[..n - 2];
        let sibilant = ["s", "sh", "ch", "x", "z"].iter().any(|s| ends_with(base, s));
        if sibilant {
            return Some(collect(base));
        }
    }
    Some(collect(&w[..n - 1]))
}
