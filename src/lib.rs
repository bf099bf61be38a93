pub mod error;
pub mod data;
pub mod fallback;
pub mod model;
pub mod normalizer;
pub mod lexicon;
pub mod token;
pub mod highlight;
pub mod config;
pub mod session;

pub use config::Config;
pub use error::{Error, ModelError, Result};
pub use fallback::RuleBased;
pub use highlight::{highlight, Highlighter, Progress};
pub use lexicon::Lexicon;
pub use model::{AnalyzedToken, DictionaryModel, LemmaModel};
pub use normalizer::Normalizer;
pub use session::{Action, Encoding, Event, Session};
pub use token::{Segment, Tag, WordRef};
