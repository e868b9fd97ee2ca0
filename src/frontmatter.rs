//! Frontmatter and excerpt splitting.
//!
//! A source file has up to three parts: a `---`-delimited YAML header, an
//! optional excerpt closed by the `<!--more-->` marker, and the remaining
//! body:
//!
//! ```text
//! ---
//! title: Hello World
//! date: 2024-01-01
//! ---
//! A hand-written summary.
//! <!--more-->
//! The rest of the post.
//! ```
//!
//! Splitting is lenient about structure — a missing header, an empty header
//! block, or an unclosed delimiter all degrade to "the whole file is body" —
//! but strict about content: a header that is present and not valid YAML is
//! an error, because silently dropping declared metadata would be worse than
//! failing the file.

use serde::Deserialize;
use thiserror::Error;

use crate::types::Cover;

/// Marks the end of a manual excerpt inside the body.
pub const EXCERPT_SEPARATOR: &str = "<!--more-->";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Declared header fields, camelCase in the source.
///
/// Everything is optional — validation and defaulting happen during
/// derivation, not here. Unknown keys are ignored (frontmatter often carries
/// fields aimed at other tools). Dates stay as raw strings because authors
/// write them in several forms; parsing them belongs to the deriver.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub locale: Option<String>,
    pub canonical: Option<String>,
    pub summary: Option<String>,
    pub date: Option<String>,
    pub publish_date: Option<String>,
    pub update_date: Option<String>,
    pub updated_date: Option<String>,
    pub draft: Option<bool>,
    /// Entries may be null (`~`) in the source; the deriver drops them.
    pub tags: Option<Vec<Option<String>>>,
    pub cover: Option<Cover>,
}

/// A source file split into its parts.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub header: Header,
    /// Text before the excerpt separator, when the body contains one.
    pub excerpt: Option<String>,
    /// Body text with header and separator removed.
    pub content: String,
}

/// Split a raw source into header, excerpt, and content.
pub fn split(source: &str) -> Result<RawDocument, FrontmatterError> {
    let (header, body) = split_header(source)?;
    let (excerpt, content) = match body.split_once(EXCERPT_SEPARATOR) {
        Some((before, after)) => (Some(before.to_string()), after.to_string()),
        None => (None, body),
    };
    Ok(RawDocument {
        header,
        excerpt,
        content,
    })
}

fn split_header(source: &str) -> Result<(Header, String), FrontmatterError> {
    let trimmed = source.trim_start();
    if !trimmed.starts_with("---") {
        return Ok((Header::default(), source.to_string()));
    }

    let after_open = &trimmed[3..];
    let after_newline = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let Some(end) = find_closing_delimiter(after_newline) else {
        // Unclosed header: treat the whole file as body
        return Ok((Header::default(), source.to_string()));
    };

    let yaml = &after_newline[..end];
    let after_close = &after_newline[end + 3..];
    let body = after_close
        .strip_prefix('\n')
        .or_else(|| after_close.strip_prefix("\r\n"))
        .unwrap_or(after_close)
        .to_string();

    let header = if yaml.trim().is_empty() {
        Header::default()
    } else {
        serde_yaml::from_str(yaml.trim())?
    };
    Ok((header, body))
}

/// Byte offset of the closing `---` line, which must stand alone.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line == "---" || line == "---\n" || line == "---\r\n" {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}
