//! CLI output formatting for the publish pipeline.
//!
//! # Information-First Display
//!
//! Output is **document-centric, not file-centric**. The primary display for
//! every document is its semantic identity — slug or title — with artifact
//! and source paths shown as secondary context via indented `Output:` /
//! `Source:` lines. A build run reads as a change log, a check run as a
//! content inventory.
//!
//! # Output Format
//!
//! ## Build
//!
//! One line per publish event, artifact path as context:
//!
//! ```text
//! hello-world - created
//!     Output: public/content/hello-world.json
//! second-post - skipped
//!     Output: public/content/second-post.json
//! work-in-progress - draft, withheld
//! ```
//!
//! ## Check
//!
//! ```text
//! Posts
//!     001 Hello World (1 min read)
//!         Source: hello-world.md
//!         Published: 2024-01-01T00:00:00+00:00
//!         Tags: Deep Dive, Rust
//!     002 Scheduled Piece (3 min read) [future]
//!         Source: scheduled-piece.md
//!         Published: 2030-06-01T00:00:00+00:00
//!
//! Pages
//!     001 About
//!         Source: about.md
//!         Who we are and why the site exists.
//!
//! Checked 2 posts, 1 pages
//! ```
//!
//! # Architecture
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::pipeline::{CheckReport, PublishEvent};
use crate::types::{Document, Page, Post};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_summary(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single publish progress event as display lines.
///
/// Slug first, outcome second, artifact path as indented context. Draft
/// events carry no artifact — the document never reached the persister.
pub fn format_publish_event(event: &PublishEvent) -> Vec<String> {
    match event {
        PublishEvent::Written {
            slug,
            outcome,
            artifact,
            ..
        } => vec![
            format!("{slug} - {outcome}"),
            format!("    Output: {}", artifact.display()),
        ],
        PublishEvent::Aggregated {
            documents,
            outcome,
            artifact,
        } => vec![
            format!("{documents} documents - {outcome}"),
            format!("    Output: {}", artifact.display()),
        ],
        PublishEvent::Draft { slug, .. } => vec![format!("{slug} - draft, withheld")],
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format check output: the derived content inventory, nothing written.
///
/// Posts and pages are separate sections; entries keep derivation order and
/// lead with their positional index and title. Draft and future posts are
/// flagged on the header line since check is where authors look for them.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let posts: Vec<&Post> = report
        .documents
        .iter()
        .filter_map(Document::as_post)
        .collect();
    let pages: Vec<&Page> = report
        .documents
        .iter()
        .filter_map(Document::as_page)
        .collect();

    let mut lines = Vec::new();

    if !posts.is_empty() {
        lines.push("Posts".to_string());
        for (i, post) in posts.iter().enumerate() {
            lines.push(format!("    {}", post_header(i + 1, post)));
            lines.push(format!(
                "        Source: {}.{}",
                post.file.name, post.file.extension
            ));
            lines.push(format!("        Published: {}", post.date.to_rfc3339()));
            if !post.summary.is_empty() {
                lines.push(format!("        {}", truncate_summary(&post.summary, 60)));
            }
            if !post.tags.is_empty() {
                let titles: Vec<&str> = post.tags.iter().map(|t| t.title.as_str()).collect();
                lines.push(format!("        Tags: {}", titles.join(", ")));
            }
            if !post.translations.is_empty() {
                let locales: Vec<&str> = post
                    .translations
                    .iter()
                    .map(|t| t.locale.as_str())
                    .collect();
                lines.push(format!("        Translations: {}", locales.join(", ")));
            }
        }
    }

    if !pages.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Pages".to_string());
        for (i, page) in pages.iter().enumerate() {
            lines.push(format!("    {} {}", format_index(i + 1), page.title));
            lines.push(format!(
                "        Source: {}.{}",
                page.file.name, page.file.extension
            ));
            if !page.summary.is_empty() {
                lines.push(format!("        {}", truncate_summary(&page.summary, 60)));
            }
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let mut tail = format!("Checked {} posts, {} pages", posts.len(), pages.len());
    if report.drafts() > 0 {
        tail.push_str(&format!(" ({} drafts)", report.drafts()));
    }
    lines.push(tail);

    lines
}

fn post_header(index: usize, post: &Post) -> String {
    let mut header = format!(
        "{} {} ({} min read)",
        format_index(index),
        post.title,
        post.reading_time.minutes
    );
    if post.draft {
        header.push_str(" [draft]");
    }
    if post.future {
        header.push_str(" [future]");
    }
    header
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
