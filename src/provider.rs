//! Read-back of published artifacts.
//!
//! The consuming site never re-parses markdown: it loads the documents the
//! pipeline published, through this module, with the same configuration the
//! pipeline ran under. [`load_documents`] resolves the output target and
//! returns the full in-memory set; the helper predicates cover the common
//! views a site front-end needs (posts only, one locale, newest first).
//!
//! The persister and this module are two halves of one contract: whatever
//! [`publish`](crate::publish) writes, `load_documents` parses back without
//! transformation. Per-document artifacts come back with `draft` defaulted
//! to `false`, since that field is stripped before publishing.

use crate::config::{OutputTarget, PipelineConfig};
use crate::types::{Document, Post};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid document in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load the published document set for `config`.
///
/// Aggregate mode parses the one array artifact. Per-document mode parses
/// every `.json` file in the output directory, in name order, one document
/// per file. A file that is not a valid document fails the load and names
/// the offending path.
pub fn load_documents(config: &PipelineConfig) -> Result<Vec<Document>, ProviderError> {
    match &config.output {
        OutputTarget::File(file) => {
            let path = PathBuf::from(shellexpand::tilde(file).into_owned());
            let content = read(&path)?;
            serde_json::from_str(&content).map_err(|source| ProviderError::Parse { path, source })
        }
        OutputTarget::Dir(dir) => {
            let dir = PathBuf::from(shellexpand::tilde(dir).into_owned());
            let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
                .map_err(|source| ProviderError::Read {
                    path: dir.clone(),
                    source,
                })?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "json"))
                .collect();

            paths.sort();

            paths
                .iter()
                .map(|path| {
                    let content = read(path)?;
                    serde_json::from_str(&content).map_err(|source| ProviderError::Parse {
                        path: path.clone(),
                        source,
                    })
                })
                .collect()
        }
    }
}

fn read(path: &Path) -> Result<String, ProviderError> {
    fs::read_to_string(path).map_err(|source| ProviderError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Predicate builder for filtering a document set down to one locale.
///
/// ```text
/// let english: Vec<_> = documents.iter().filter(|d| of_locale("en")(d)).collect();
/// ```
pub fn of_locale(locale: &str) -> impl Fn(&Document) -> bool + '_ {
    move |document| document.locale() == locale
}

/// Comparator for post listings: publish date descending, newest first.
pub fn chronological(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date)
}
