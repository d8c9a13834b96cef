//! Renders accumulated records as an Anki-importable CSV deck and writes it
//! to disk in one shot.

use std::path::Path;

use tokio::fs;

use crate::record::{Example, Vocab};
use crate::Result;

/// Import directives Anki reads ahead of the data rows. `html:true` lets the
/// line breaks embedded in the vocab column render as separate lines.
const PREAMBLE: &str = "#separator:,\n\
                        #html:true\n\
                        #columns:japanese,english,vocab,section,chapter,link\n\
                        #deck:A Guide to Japanese Grammar by Tae Kim - Examples\n";

const ROW_TERMINATOR: &str = "\r\n";

/// Renders the deck and writes it to `path`, replacing any previous file.
pub(crate) async fn write_deck(path: &Path, examples: &[Example]) -> Result<()> {
    fs::write(path, render_deck(examples)).await?;
    Ok(())
}

/// The full file contents: preamble, then one row per exported record, in
/// accumulation order. Vocabulary-tagged records produce no row.
fn render_deck(examples: &[Example]) -> String {
    let mut out = String::from(PREAMBLE);
    for example in examples.iter().filter(|ex| !vocab_only(ex)) {
        let vocab = render_vocabulary(&example.vocabulary);
        push_row(
            &mut out,
            &[
                &example.japanese,
                &example.english,
                &vocab,
                &example.section,
                &example.chapter,
                &example.source_link,
            ],
        );
    }
    out
}

fn vocab_only(example: &Example) -> bool {
    example.tag.as_deref().is_some_and(|tag| tag.contains("vocab"))
}

/// One line per entry, `term: gloss`.
fn render_vocabulary(vocabulary: &[Vocab]) -> String {
    vocabulary
        .iter()
        .map(|v| format!("{}: {}", v.term, v.gloss))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Appends one CRLF-terminated row with every field quoted, whatever it
/// contains.
fn push_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_quoted(out, field);
    }
    out.push_str(ROW_TERMINATOR);
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

// ── Tests ──
