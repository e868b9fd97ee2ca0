//! Plain-text extraction and reading-time estimation.
//!
//! Summaries are stored as plain text, not markdown: consumers render them
//! into `<meta>` descriptions, RSS items, and link previews where markup
//! would leak through literally. [`plain_text`] walks the markdown event
//! stream and keeps only human-readable content — inline markup dissolves
//! into its text, block boundaries become single spaces, raw HTML
//! contributes nothing.

use pulldown_cmark::{Event, Parser, TagEnd};

use crate::types::ReadingTime;

/// Reading speed assumed for the minute estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Strip markdown structure from `markdown`, returning readable text.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => push_space(&mut out),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
            ) => push_space(&mut out),
            _ => {}
        }
    }
    out.trim().to_string()
}

fn push_space(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

/// Whitespace-separated word count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimate reading time for a markdown body.
///
/// Minutes are ceiling-rounded and never fall below 1 for non-empty input;
/// an empty body reads in 0 minutes.
pub fn reading_time(markdown: &str) -> ReadingTime {
    let words = count_words(&plain_text(markdown));
    let minutes = if markdown.trim().is_empty() {
        0
    } else {
        words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
    };
    ReadingTime { words, minutes }
}
