//! Idempotent persistence.
//!
//! Stage 3 of the publishing pipeline: write normalized documents to disk
//! and report what actually changed. Every write resolves to an [`Outcome`],
//! so a run over unchanged content is observable as a run that wrote
//! nothing.
//!
//! ## Per-document mode
//!
//! Each document lands at `{dir}/{slug}.json`. Before writing, the
//! candidate bytes are hashed and compared against the artifact already on
//! disk; identical content short-circuits to [`Outcome::Existing`] without
//! touching the file, which keeps artifact mtimes stable for tooling that
//! watches the output directory. The candidate is hashed in memory since it
//! is already there; the existing artifact is streamed through the hasher
//! rather than loaded whole.
//!
//! The `draft` flag never reaches a per-document artifact. It is a routing
//! field for the pipeline, not content, and stripping it keeps published
//! output byte-stable when a post merely passes through a draft phase in
//! the source history.
//!
//! ## Aggregate mode
//!
//! All documents serialize into one JSON array, rewritten on every run.
//! Consumers of the aggregate want exactly one file to track, so its
//! outcome is only ever `New` or `Overwritten`, never `Existing`.

use crate::types::Document;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the persister did with one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No artifact existed; one was created.
    New,
    /// An identical artifact existed; nothing was written.
    Existing,
    /// A differing artifact existed; it was replaced.
    Overwritten,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::New => write!(f, "created"),
            Outcome::Existing => write!(f, "skipped"),
            Outcome::Overwritten => write!(f, "overwritten"),
        }
    }
}

/// Artifact path for a document in per-document mode.
pub fn document_path(dir: &Path, slug: &str) -> PathBuf {
    dir.join(format!("{slug}.json"))
}

/// Write one document to `{dir}/{slug}.json`, gated on content hash.
pub fn write_document(document: &Document, dir: &Path) -> Result<Outcome, PublishError> {
    let path = document_path(dir, document.slug());
    let bytes = render_document(document)?;

    if path.exists() {
        let existing = hash_file(&path).map_err(|source| PublishError::Read {
            path: path.clone(),
            source,
        })?;
        if hash_bytes(&bytes) == existing {
            return Ok(Outcome::Existing);
        }
        write_bytes(&path, &bytes)?;
        return Ok(Outcome::Overwritten);
    }

    fs::create_dir_all(dir).map_err(|source| PublishError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    write_bytes(&path, &bytes)?;
    Ok(Outcome::New)
}

/// Write every document into one aggregate JSON array at `path`.
pub fn write_collection(documents: &[Document], path: &Path) -> Result<Outcome, PublishError> {
    let bytes = serde_json::to_vec(documents)?;
    let outcome = if path.exists() {
        Outcome::Overwritten
    } else {
        Outcome::New
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PublishError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    write_bytes(path, &bytes)?;
    Ok(outcome)
}

/// Serialize one document for its per-document artifact.
fn render_document(document: &Document) -> Result<Vec<u8>, PublishError> {
    let mut value = serde_json::to_value(document)?;
    if let Some(object) = value.as_object_mut() {
        object.remove("draft");
    }
    Ok(serde_json::to_vec(&value)?)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), PublishError> {
    fs::write(path, bytes).map_err(|source| PublishError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// SHA-256 of in-memory bytes, as a hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// SHA-256 of a file's contents, streamed, as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}
