//! Command line front end for a personal word bank.
//!
//! ```bash
//! wordbank add serendipity ephemeral
//! wordbank locate ephemeral
//! echo "Running late again." | wordbank highlight
//! wordbank highlight --file chapter1.txt --json
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordbank::session::import_text;
use wordbank::{Action, Config, Event, Segment, Session};

#[derive(Parser)]
#[command(name = "wordbank")]
#[command(version)]
#[command(about = "Keep a word bank and highlight its words in any English text")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON config file; defaults apply when it does not exist
    #[arg(long, global = true, default_value = "wordbank.json")]
    config: PathBuf,

    /// Word bank file, overriding the config
    #[arg(long, global = true)]
    bank: Option<PathBuf>,

    /// JSON lemma table, overriding the config
    #[arg(long, global = true)]
    lemmas: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Add words to the bank
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Remove words from the bank
    Remove {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// List every word in order
    List,
    /// List words containing a keyword
    Search { keyword: String },
    /// Show a word's position in the listing
    Locate { word: String },
    /// Mark bank words in text read from a file or stdin
    Highlight {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print segments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a text file the way it will be highlighted
    Import { path: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(bank) = cli.bank {
        config.word_bank = bank;
    }
    if let Some(lemmas) = cli.lemmas {
        config.lemma_table = Some(lemmas);
    }

    let bank_exists = config.word_bank.exists();
    let mut session = Session::from_config(config);
    if bank_exists {
        session.dispatch(Action::Load(None))?;
    }

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Add { words } => {
            for word in words {
                report(&mut out, &session.dispatch(Action::Add(word))?)?;
            }
            persist(&session)?;
        }
        Command::Remove { words } => {
            for word in words {
                report(&mut out, &session.dispatch(Action::Remove(word))?)?;
            }
            persist(&session)?;
        }
        Command::List => report(&mut out, &session.dispatch(Action::List)?)?,
        Command::Search { keyword } => report(&mut out, &session.dispatch(Action::Search(keyword))?)?,
        Command::Locate { word } => report(&mut out, &session.dispatch(Action::Locate(word))?)?,
        Command::Highlight { file, json } => {
            let text = match file {
                Some(path) => import_text(&path)?.0,
                None => {
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
                    text
                }
            };
            let event = session.dispatch(Action::Highlight(text))?;
            if json {
                serde_json::to_writer_pretty(&mut out, &event)?;
                writeln!(out)?;
            } else {
                report(&mut out, &event)?;
            }
        }
        Command::Import { path } => report(&mut out, &session.dispatch(Action::Import(path))?)?,
    }
    Ok(())
}

// Written even when the bank is empty, so removing the last word sticks.
fn persist(session: &Session) -> Result<()> {
    let path = &session.config().word_bank;
    session.lexicon().save(path)?;
    Ok(())
}

fn render(segments: &[Segment]) -> String {
    let mut s = String::new();
    for seg in segments {
        if seg.is_highlight() {
            s.push('[');
            s.push_str(&seg.text);
            s.push(']');
        } else {
            s.push_str(&seg.text);
        }
    }
    s
}

fn report(out: &mut impl Write, event: &Event) -> io::Result<()> {
    match event {
        Event::Added { word } => writeln!(out, "added {word}"),
        Event::AlreadyPresent { word } => writeln!(out, "{word} is already in the word bank"),
        Event::Removed { word } => writeln!(out, "removed {word}"),
        Event::NotInBank { word } => writeln!(out, "{word} is not in the word bank"),
        Event::InvalidWord { input } => writeln!(out, "not an English word: {input:?}"),
        Event::Words { words } if words.is_empty() => writeln!(out, "the word bank is empty"),
        Event::Words { words } => words.iter().try_for_each(|w| writeln!(out, "{w}")),
        Event::Matches { keyword, words } if words.is_empty() => {
            writeln!(out, "no words contain {keyword:?}")
        }
        Event::Matches { words, .. } => words.iter().try_for_each(|w| writeln!(out, "{w}")),
        Event::Located { word, position } => writeln!(out, "{word} is word #{position}"),
        Event::Highlighted { segments } => write!(out, "{}", render(segments)),
        Event::Saved { path, count } => writeln!(out, "saved {count} words to {}", path.display()),
        Event::NothingToSave => writeln!(out, "the word bank is empty, nothing to save"),
        Event::Loaded { path, count } => {
            writeln!(out, "loaded {count} words from {}", path.display())
        }
        Event::Imported { text, .. } => write!(out, "{text}"),
    }
}
