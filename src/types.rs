//! Shared document model serialized by every pipeline stage.
//!
//! A [`Document`] is the canonical output unit: a closed `Page | Post` sum
//! type with a `type` discriminant in its JSON form. The persister writes
//! these records and the provider reads them back, so the serde shape here
//! *is* the on-disk artifact format (camelCase field names, optional fields
//! omitted rather than null).

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source file descriptor carried into the output record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRef {
    /// File stem (no directory, no extension).
    pub name: String,
    /// Source extension, `md` or `mdx`.
    #[serde(rename = "type")]
    pub extension: String,
}

/// A normalized tag: display title plus its slug form.
///
/// `deep-dive` becomes `{ title: "Deep Dive", slug: "deep-dive" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub title: String,
    pub slug: String,
}

/// Reading-time estimate for a post body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadingTime {
    /// Word count over the full body.
    pub words: usize,
    /// Ceiling-rounded minutes, at least 1 for non-empty content.
    pub minutes: u32,
}

/// Cover image: either a bare path or a path with a photographer credit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Cover {
    Plain(String),
    Credited { image: String, credit: String },
}

/// Reduced view of a translated sibling, attached by the linker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationRef {
    pub locale: String,
    pub title: String,
    pub url: String,
}

/// Document discriminant, used for linking and URL construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Page,
    Post,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Page => write!(f, "page"),
            DocumentKind::Post => write!(f, "post"),
        }
    }
}

/// A static page: common fields only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub file: FileRef,
    pub title: String,
    pub slug: String,
    /// Plain-text summary; empty string when the source declares none.
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    /// Body content with the excerpt delimiter stripped.
    pub raw_content: String,
    pub locale: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<TranslationRef>,
}

/// A dated post: common fields plus publication metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub file: FileRef,
    pub title: String,
    pub slug: String,
    /// Plain-text summary; empty string when the source declares none.
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    /// Body content with the excerpt delimiter stripped.
    pub raw_content: String,
    pub locale: String,
    /// Publish date, RFC 3339 with timezone offset.
    pub date: DateTime<FixedOffset>,
    /// Last-update date; equals `date` unless the header declares one.
    pub updated_date: DateTime<FixedOffset>,
    /// Publish date is later than the generation instant.
    pub future: bool,
    /// Internal flag; stripped from per-document artifacts, so absent on
    /// read-back.
    #[serde(default)]
    pub draft: bool,
    pub reading_time: ReadingTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<Cover>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<TranslationRef>,
}

/// The canonical output unit: a page or a post, tagged by `type`.
///
/// The discriminant is validated by serde before any variant field is
/// touched, so a record with an unknown `type` fails to parse instead of
/// producing a half-formed document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Document {
    Page(Page),
    Post(Post),
}

impl Document {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Page(_) => DocumentKind::Page,
            Document::Post(_) => DocumentKind::Post,
        }
    }

    pub fn is_page(&self) -> bool {
        matches!(self, Document::Page(_))
    }

    pub fn is_post(&self) -> bool {
        matches!(self, Document::Post(_))
    }

    pub fn as_page(&self) -> Option<&Page> {
        match self {
            Document::Page(page) => Some(page),
            Document::Post(_) => None,
        }
    }

    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Document::Page(_) => None,
            Document::Post(post) => Some(post),
        }
    }

    pub fn file(&self) -> &FileRef {
        match self {
            Document::Page(p) => &p.file,
            Document::Post(p) => &p.file,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Document::Page(p) => &p.title,
            Document::Post(p) => &p.title,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Document::Page(p) => &p.slug,
            Document::Post(p) => &p.slug,
        }
    }

    pub fn locale(&self) -> &str {
        match self {
            Document::Page(p) => &p.locale,
            Document::Post(p) => &p.locale,
        }
    }

    /// Pages are never drafts.
    pub fn is_draft(&self) -> bool {
        match self {
            Document::Page(_) => false,
            Document::Post(p) => p.draft,
        }
    }

    /// Publish date, `None` for pages.
    pub fn publish_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Document::Page(_) => None,
            Document::Post(p) => Some(p.date),
        }
    }

    pub fn translations(&self) -> &[TranslationRef] {
        match self {
            Document::Page(p) => &p.translations,
            Document::Post(p) => &p.translations,
        }
    }

    pub fn translations_mut(&mut self) -> &mut Vec<TranslationRef> {
        match self {
            Document::Page(p) => &mut p.translations,
            Document::Post(p) => &mut p.translations,
        }
    }
}
