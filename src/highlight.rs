use std::sync::LazyLock;
use regex::Regex;
use crate::lexicon::Lexicon;
use crate::model::AnalyzedToken;
use crate::normalizer::Normalizer;
use crate::token::Segment;

pub(crate) static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.done as f64 * 100.0 / self.total as f64
    }
}

/// Segments `text`, marking every word whose base form is in `lexicon`.
pub fn highlight(text: &str, lexicon: &Lexicon, normalizer: &Normalizer) -> Vec<Segment> {
    Highlighter::new(lexicon, normalizer).highlight(text)
}

/// Splits text into segments that concatenate back to the input, tagging
/// words found in the lexicon.
///
/// Holds only shared borrows; any number of highlighters may run against
/// the same lexicon at once, as long as nothing mutates it meanwhile.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'a> {
    lexicon: &'a Lexicon,
    normalizer: &'a Normalizer,
}

impl<'a> Highlighter<'a> {
    pub fn new(lexicon: &'a Lexicon, normalizer: &'a Normalizer) -> Self {
        Self { lexicon, normalizer }
    }

    pub fn highlight(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut ordinal = 0;
        self.segment_into(text, &mut segments, &mut ordinal);
        tracing::debug!("highlighted {} words in {} segments", ordinal, segments.len());
        segments
    }

    /// Highlights paragraph by paragraph, reporting after each one.
    ///
    /// Paragraphs are separated by blank lines; the separators stay in the
    /// output verbatim and word ordinals keep counting across paragraphs.
    pub fn highlight_with_progress<F>(&self, text: &str, mut on_progress: F) -> Vec<Segment>
    where
        F: FnMut(Progress),
    {
        let chunks = paragraphs(text);
        let total = chunks.len();
        let mut segments = Vec::new();
        let mut ordinal = 0;
        for (i, chunk) in chunks.into_iter().enumerate() {
            self.segment_into(chunk, &mut segments, &mut ordinal);
            on_progress(Progress { done: i + 1, total });
        }
        tracing::debug!("highlighted {} words across {} paragraphs", ordinal, total);
        segments
    }

    fn segment_into(&self, text: &str, out: &mut Vec<Segment>, ordinal: &mut usize) {
        let Some(model) = self.normalizer.model() else {
            self.segment_runs(text, out, ordinal);
            return;
        };
        match model.analyze(text) {
            Ok(tokens) => self.segment_analyzed(text, &tokens, out, ordinal),
            Err(e) => {
                tracing::warn!("lemma model could not analyze text, splitting on letters: {e}");
                self.segment_runs(text, out, ordinal);
            }
        }
    }

    fn segment_runs(&self, text: &str, out: &mut Vec<Segment>, ordinal: &mut usize) {
        for (run, alphabetic) in runs(text) {
            if alphabetic {
                self.push_word(run, out, ordinal);
            } else {
                out.push(Segment::plain(run));
            }
        }
    }

    fn push_word(&self, surface: &str, out: &mut Vec<Segment>, ordinal: &mut usize) {
        let segment = match self.normalizer.try_normalize(surface) {
            Ok(lemma) if !lemma.is_empty() => {
                let in_bank = self.lexicon.contains(&lemma);
                Segment::word(surface, lemma, *ordinal, in_bank)
            }
            Ok(_) => Segment::word(surface, surface.to_lowercase(), *ordinal, false),
            Err(e) => {
                tracing::warn!("lemma model failed for {surface:?}: {e}");
                Segment::word(surface, surface.to_lowercase(), *ordinal, false)
            }
        };
        *ordinal += 1;
        out.push(segment);
    }

    fn segment_analyzed(
        &self,
        text: &str,
        tokens: &[AnalyzedToken],
        out: &mut Vec<Segment>,
        ordinal: &mut usize,
    ) {
        let mut cursor = 0;
        for tk in tokens {
            if !fits(text, cursor, tk) {
                tracing::debug!("ignoring model token {:?} at {}..{}", tk.text, tk.start, tk.end);
                continue;
            }
            if tk.start > cursor {
                out.push(Segment::plain(&text[cursor..tk.start]));
            }
            let surface = &text[tk.start..tk.end];
            let lemma = tk.lemma.trim().to_lowercase();
            let segment = if lemma.is_empty() {
                Segment::word(surface, surface.to_lowercase(), *ordinal, false)
            } else {
                let in_bank = self.lexicon.contains(&lemma);
                Segment::word(surface, lemma, *ordinal, in_bank)
            };
            out.push(segment);
            *ordinal += 1;
            cursor = tk.end;
        }
        if cursor < text.len() {
            out.push(Segment::plain(&text[cursor..]));
        }
    }
}

// A model token is usable only if it lies after everything emitted so far
// and matches the text it claims to cover.
fn fits(text: &str, cursor: usize, tk: &AnalyzedToken) -> bool {
    tk.start >= cursor
        && tk.start < tk.end
        && tk.end <= text.len()
        && text.is_char_boundary(tk.start)
        && text.is_char_boundary(tk.end)
        && text[tk.start..tk.end] == tk.text
        && tk.text.chars().all(char::is_alphabetic)
}

/// Maximal runs of alphabetic and non-alphabetic chars, in order.
fn runs(text: &str) -> impl Iterator<Item = (&str, bool)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let alphabetic = first.is_alphabetic();
        let end = rest
            .char_indices()
            .find(|&(_, c)| c.is_alphabetic() != alphabetic)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some((run, alphabetic))
    })
}

fn paragraphs(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for m in PARAGRAPH_BREAK.find_iter(text) {
        chunks.push(&text[start..m.end()]);
        start = m.end();
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}
