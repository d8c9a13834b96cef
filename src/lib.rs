//! Scrapes example sentences and vocabulary from Tae Kim's Guide to
//! Japanese Grammar and writes them out as an Anki-importable CSV deck.
//!
//! Pages are fetched one at a time, following the guide's own next-page
//! links; see [`process::run`].
// TODO:
//  -   Resolve relative next-page addresses; the guide links absolute ones today.

mod error;
mod export;
mod macros;
mod parse;
pub mod process;
pub mod record;
mod request;

use std::path::PathBuf;

pub use error::{Error, Result};

/// First grammar chapter of the guide, where a full scrape starts.
pub const DEFAULT_SEED_URL: &str =
    "https://www.guidetojapanese.org/learn/grammar/stateofbeing/";
pub const DEFAULT_OUTPUT_PATH: &str = "out.csv";

/// Run configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// Address the pagination chain starts from.
    pub seed_url: String,
    /// Deck file destination, replaced on every run.
    pub output_path: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}
