//! Shared test utilities for the quern test suite.
//!
//! Provides canned document builders, config builders for temp source trees,
//! and lookup helpers that panic with the available slugs on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut documents = vec![
//!     post("hello", "en", "Hello"),
//!     post("hello", "es", "Hola"),
//! ];
//! translations::link(&mut documents, "en");
//!
//! let hello = find_post(&documents, "hello");
//! assert_eq!(hello.translations.len(), 1);
//! ```

use std::path::Path;

use crate::config::{OutputTarget, PipelineConfig};
use crate::types::{Document, FileRef, Page, Post, ReadingTime};
use chrono::{DateTime, FixedOffset};

/// Publish date shared by canned posts.
pub const SAMPLE_DATE: &str = "2024-01-01T00:00:00+00:00";

// =========================================================================
// Document builders
// =========================================================================

/// A post with fixed metadata and the shared sample date.
pub fn post(slug: &str, locale: &str, title: &str) -> Document {
    dated_post(slug, locale, title, SAMPLE_DATE)
}

/// A post published at an explicit RFC 3339 instant.
pub fn dated_post(slug: &str, locale: &str, title: &str, date: &str) -> Document {
    let date: DateTime<FixedOffset> = date.parse().unwrap();
    Document::Post(Post {
        file: FileRef {
            name: slug.to_string(),
            extension: "md".to_string(),
        },
        title: title.to_string(),
        slug: slug.to_string(),
        summary: String::new(),
        canonical: None,
        raw_content: format!("Body of {slug}."),
        locale: locale.to_string(),
        date,
        updated_date: date,
        future: false,
        draft: false,
        reading_time: ReadingTime {
            words: 3,
            minutes: 1,
        },
        cover: None,
        tags: Vec::new(),
        translations: Vec::new(),
    })
}

/// An English draft post.
pub fn draft_post(slug: &str, title: &str) -> Document {
    let mut doc = post(slug, "en", title);
    if let Document::Post(post) = &mut doc {
        post.draft = true;
    }
    doc
}

/// A page with fixed metadata.
pub fn page(slug: &str, locale: &str, title: &str) -> Document {
    Document::Page(Page {
        file: FileRef {
            name: slug.to_string(),
            extension: "md".to_string(),
        },
        title: title.to_string(),
        slug: slug.to_string(),
        summary: String::new(),
        canonical: None,
        raw_content: format!("Body of {slug}."),
        locale: locale.to_string(),
        translations: Vec::new(),
    })
}

// =========================================================================
// Config builders
// =========================================================================

/// Flat posts tree at `source`, per-document output into `dir`.
pub fn per_document_config(source: &Path, dir: &Path) -> PipelineConfig {
    PipelineConfig {
        source: source.to_string_lossy().to_string(),
        output: OutputTarget::Dir(dir.to_string_lossy().to_string()),
        ..PipelineConfig::default()
    }
}

/// Flat posts tree at `source`, aggregate output at `file`.
pub fn aggregate_config(source: &Path, file: &Path) -> PipelineConfig {
    PipelineConfig {
        source: source.to_string_lossy().to_string(),
        output: OutputTarget::File(file.to_string_lossy().to_string()),
        ..PipelineConfig::default()
    }
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a document by slug. Panics if not found.
pub fn find_document<'a>(documents: &'a [Document], slug: &str) -> &'a Document {
    documents
        .iter()
        .find(|d| d.slug() == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = documents.iter().map(|d| d.slug()).collect();
            panic!("document '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a post by slug. Panics if not found or if the slug names a page.
pub fn find_post<'a>(documents: &'a [Document], slug: &str) -> &'a Post {
    match find_document(documents, slug) {
        Document::Post(post) => post,
        Document::Page(_) => panic!("document '{slug}' is a page, expected a post"),
    }
}
