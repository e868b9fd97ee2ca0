//! Document derivation.
//!
//! Stage 2 of the publishing pipeline: one scanned source file in, one
//! normalized [`Document`] out. Derivation depends only on the file content,
//! the configuration, and the generation instant, so files can be derived in
//! parallel.
//!
//! ## Field resolution
//!
//! Each field is resolved independently. The first non-empty source wins:
//!
//! - **Title**: `title` attribute → filename stem
//! - **Slug**: `slug` attribute → slugified filename stem
//! - **Summary**: excerpt (rendered to plain text) → `summary` attribute → ""
//! - **Locale**: `locale` attribute → configured default locale
//!
//! ## Dates
//!
//! Posts must declare a date. `date` wins over `publishDate`, and
//! `updateDate`/`updatedDate` default to the publish date. Accepted forms:
//!
//! ```text
//! 2024-01-01T10:30:00+02:00    RFC 3339, declared offset kept
//! 2024-01-01T10:30:00          local time, stamped with the run offset
//! 2024-01-01 10:30:00          same, space-separated
//! 2024-01-01                   midnight, stamped with the run offset
//! ```
//!
//! A value in any other form is passed over, so a garbled `date` still
//! derives from a well-formed `publishDate`. A post fails the run only when
//! no source yields a date: nothing declared, or everything declared is
//! garbled. Stamping "now" over the gap would bury an authoring mistake in
//! plausible output.
//!
//! ## Tags
//!
//! Tags normalize to a title/slug pair: `deep-dive` becomes
//! `{ title: "Deep Dive", slug: "deep-dive" }`. Null and blank entries are
//! dropped, and a repeated slug keeps its first occurrence.

use crate::config::PipelineConfig;
use crate::frontmatter::{self, FrontmatterError, RawDocument};
use crate::scan::SourceFile;
use crate::text;
use crate::types::{Document, DocumentKind, FileRef, Page, Post, Tag};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
    #[error("Post {0} has no date or publishDate attribute")]
    MissingDate(String),
    #[error("Invalid date '{value}' in post {slug}")]
    InvalidDate { slug: String, value: String },
}

/// Derive the normalized document for one source file.
///
/// `now` is the generation instant: it decides the `future` flag and donates
/// its offset to dates declared without one.
pub fn derive_document(
    file: &SourceFile,
    config: &PipelineConfig,
    now: DateTime<FixedOffset>,
) -> Result<Document, MetadataError> {
    let source = fs::read_to_string(&file.path).map_err(|source| MetadataError::Read {
        path: file.path.clone(),
        source,
    })?;
    let RawDocument {
        header,
        excerpt,
        content,
    } = frontmatter::split(&source).map_err(|source| MetadataError::Frontmatter {
        path: file.path.clone(),
        source,
    })?;

    let file_ref = FileRef {
        name: file.name.clone(),
        extension: file.extension.clone(),
    };
    let title = resolve(&[header.title.as_deref()]).unwrap_or_else(|| file.name.clone());
    let slug = resolve(&[header.slug.as_deref()]).unwrap_or_else(|| slug::slugify(&file.name));

    let summary = resolve(&[excerpt.as_deref(), header.summary.as_deref()])
        .map(|source| text::plain_text(&source))
        .unwrap_or_default();

    let canonical = resolve(&[header.canonical.as_deref()]);
    let locale =
        resolve(&[header.locale.as_deref()]).unwrap_or_else(|| config.default_locale.clone());

    match file.kind {
        DocumentKind::Page => Ok(Document::Page(Page {
            file: file_ref,
            title,
            slug,
            summary,
            canonical,
            raw_content: content,
            locale,
            translations: Vec::new(),
        })),
        DocumentKind::Post => {
            let offset = *now.offset();
            let date = resolve_date(
                &[header.date.as_deref(), header.publish_date.as_deref()],
                &slug,
                offset,
            )?
            .ok_or_else(|| MetadataError::MissingDate(slug.clone()))?;
            let updated_date = resolve_date(
                &[header.update_date.as_deref(), header.updated_date.as_deref()],
                &slug,
                offset,
            )?
            .unwrap_or(date);

            // Reading time spans the whole body, excerpt included
            let reading_time = match &excerpt {
                Some(excerpt) => text::reading_time(&format!("{excerpt} {content}")),
                None => text::reading_time(&content),
            };

            Ok(Document::Post(Post {
                file: file_ref,
                title,
                slug,
                summary,
                canonical,
                raw_content: content,
                locale,
                date,
                updated_date,
                future: date > now,
                draft: header.draft.unwrap_or(false),
                reading_time,
                cover: header.cover,
                tags: normalize_tags(header.tags.as_deref().unwrap_or_default()),
                translations: Vec::new(),
            }))
        }
    }
}

/// Resolve a field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value, trimmed. This is the core merge operation
/// behind every fallback chain in this module:
///
/// ```text
/// title:   resolve(&[title_attr, /* then filename */])
/// summary: resolve(&[excerpt,    summary_attr])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Resolve and parse a date from its attribute sources.
///
/// Sources are tried in priority order and the first value in an accepted
/// form wins; values in no accepted form are passed over. The error is
/// raised only when something was declared and nothing parsed, and it names
/// the highest-priority declared value. `Ok(None)` means no source declared
/// a date at all.
fn resolve_date(
    sources: &[Option<&str>],
    slug: &str,
    offset: FixedOffset,
) -> Result<Option<DateTime<FixedOffset>>, MetadataError> {
    let declared: Vec<&str> = sources
        .iter()
        .filter_map(|opt| opt.map(str::trim).filter(|s| !s.is_empty()))
        .collect();
    if let Some(date) = declared.iter().find_map(|value| parse_date(value, offset)) {
        return Ok(Some(date));
    }
    match declared.first() {
        Some(value) => Err(MetadataError::InvalidDate {
            slug: slug.to_string(),
            value: value.to_string(),
        }),
        None => Ok(None),
    }
}

fn parse_date(value: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date);
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })?;

    // Always single for a fixed offset
    offset.from_local_datetime(&naive).single()
}

fn normalize_tags(declared: &[Option<String>]) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();
    for tag in declared.iter().flatten() {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let slug = slug::slugify(tag);
        if tags.iter().any(|t| t.slug == slug) {
            continue;
        }
        tags.push(Tag {
            title: title_case(tag),
            slug,
        });
    }
    tags
}

/// `deep-dive` → `Deep Dive`. Existing capitals are kept, so `macOS-tips`
/// becomes `MacOS Tips`.
fn title_case(tag: &str) -> String {
    tag.split(['-', '_', ' '])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
