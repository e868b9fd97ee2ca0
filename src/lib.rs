//! # quern
//!
//! A content normalization and idempotent-publish pipeline for markdown
//! sources. Your filesystem is the data source: a directory of Markdown/MDX
//! files with YAML frontmatter goes in, normalized JSON documents come out,
//! and nothing is rewritten unless its content actually changed.
//!
//! # Architecture: Staged Pipeline
//!
//! A build run moves the content set through independent stages, each a pure
//! function over the previous stage's output:
//!
//! ```text
//! 1. Scan       content/   →  source files       (layout-aware enumeration)
//! 2. Derive     file       →  Document           (parallel, one task per file)
//! 3. Link       documents  →  documents          (cross-locale translations)
//! 4. Publish    Document   →  {slug}.json        (parallel, hash-gated writes)
//! ```
//!
//! Stages are barriers: every task of a stage completes before the next
//! stage starts, and the first failing task fails the run before any output
//! is finalized. This separation exists for three reasons:
//!
//! - **Idempotence**: publish decisions compare content hashes against the
//!   artifacts already on disk, so an unchanged source tree is a no-op run.
//! - **Parallelism**: derivation and persistence are per-file/per-slug
//!   independent, so both stages fan out freely.
//! - **Testability**: each stage is exercised on its own, without the CLI
//!   and mostly without the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — enumerates content files under the source root, classifying them by layout |
//! | [`frontmatter`] | Splits a raw source into YAML header, optional excerpt, and body |
//! | [`metadata`] | Stage 2 — derives one normalized [`types::Document`] per source file |
//! | [`text`] | Markdown-to-plain-text stripping and reading-time estimation |
//! | [`translations`] | Stage 3 — cross-links documents sharing a slug across locales |
//! | [`publish`] | Stage 4 — hash-gated per-document artifacts or one aggregate array |
//! | [`pipeline`] | Orchestration: stage sequencing, draft filtering, outcome counts |
//! | [`provider`] | Read-back of published artifacts for the consuming site |
//! | [`config`] | `quern.toml` loading and validation |
//! | [`output`] | CLI output formatting — publish events and the check inventory |
//! | [`types`] | Shared document model serialized by every stage |
//!
//! # Design Decisions
//!
//! ## Hash-Gated Writes
//!
//! In per-document mode an artifact is rewritten only when the SHA-256 of
//! its new serialization differs from the file already on disk. Tooling
//! that watches the output directory (deploy hooks, CDN sync, `rsync -u`)
//! sees mtime changes only for real edits. The existing file is hashed
//! through a streamed read; the candidate is hashed in memory, where it
//! already lives — an intentional asymmetry that bounds memory on the read
//! path and keeps the write path simple.
//!
//! ## A Closed Document Type
//!
//! Everything downstream of derivation speaks [`types::Document`], a closed
//! `Page | Post` sum type tagged by a `type` discriminant in its JSON form.
//! Serde validates the discriminant before any variant field is touched, so
//! a foreign record in the output directory fails the read-back loudly
//! instead of producing a half-formed document.
//!
//! ## Fail-Fast Batches
//!
//! A post without a resolvable date, a file in an unrecognized directory,
//! or an I/O failure aborts the run naming the offending slug or path.
//! There is no partial-success mode: authors fix the named file and re-run,
//! and the hash gate makes the re-run cheap.
//!
//! ## Drafts Are Routing, Not Content
//!
//! `draft: true` keeps a post out of every output mode, counted but never
//! written. The flag itself is stripped from per-document artifacts so a
//! post's published bytes do not change when it merely passes through a
//! draft phase in the source history.

pub mod config;
pub mod frontmatter;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod provider;
pub mod publish;
pub mod scan;
pub mod text;
pub mod translations;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
