//! Pipeline orchestration.
//!
//! Wires the stages into one run:
//!
//! ```text
//! scan::enumerate        source tree → files
//! metadata::derive       file → document              (parallel, fail-fast)
//! locale filter + link   multi-locale mode only
//! draft filter           drafts never reach output
//! publish                per-document (parallel) or one aggregate
//! ```
//!
//! Stages are barriers: every task of a stage completes before the next
//! stage starts, and the first failing task fails the whole run. Derivation
//! and persistence fan out with rayon and never share mutable state: each
//! derivation task owns one source file, and per-document persistence
//! rejects duplicate slugs up front so each write task owns one artifact
//! path. Translation linking is the one whole-set pass and runs on the
//! joined result vector.
//!
//! The draft filter here is the single point deciding whether a document
//! reaches persistence. Drafts are withheld in both output modes;
//! future-dated posts pass through carrying their `future` flag.
//!
//! Progress is reported through an optional channel rather than printed
//! here, so the pipeline stays usable as a library. The CLI attaches a
//! printer thread to the receiving end.

use crate::config::{ConfigError, OutputTarget, PipelineConfig};
use crate::metadata::{self, MetadataError};
use crate::publish::{self, Outcome, PublishError};
use crate::scan::{self, ScanError};
use crate::translations;
use crate::types::Document;
use chrono::{DateTime, FixedOffset, Local};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),
    #[error("Documents {first} and {second} both resolve to slug '{slug}'")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),
}

/// Progress event emitted while documents publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    /// A per-document artifact was resolved (written or found identical).
    Written {
        title: String,
        slug: String,
        outcome: Outcome,
        artifact: PathBuf,
    },
    /// The aggregate artifact was written.
    Aggregated {
        documents: usize,
        outcome: Outcome,
        artifact: PathBuf,
    },
    /// A draft was withheld before persistence.
    Draft { title: String, slug: String },
}

/// Artifact outcome counts for one run, plus the withheld drafts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub new: u32,
    pub existing: u32,
    pub overwritten: u32,
    pub drafts: u32,
}

impl RunSummary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::New => self.new += 1,
            Outcome::Existing => self.existing += 1,
            Outcome::Overwritten => self.overwritten += 1,
        }
    }

    pub fn draft(&mut self) {
        self.drafts += 1;
    }

    /// Artifacts touched or skipped, drafts excluded.
    pub fn artifacts(&self) -> u32 {
        self.new + self.existing + self.overwritten
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} skipped, {} overwritten",
            self.new, self.existing, self.overwritten
        )?;
        if self.drafts > 0 {
            write!(f, " ({} drafts withheld)", self.drafts)?;
        }
        Ok(())
    }
}

/// Derived view of the source tree, produced by [`check`].
#[derive(Debug)]
pub struct CheckReport {
    /// Every derivable document, drafts included.
    pub documents: Vec<Document>,
}

impl CheckReport {
    pub fn drafts(&self) -> usize {
        self.documents.iter().filter(|d| d.is_draft()).count()
    }
}

/// Run the full pipeline: enumerate, derive, link, filter, persist.
///
/// Returns the artifact outcome counts. When `progress` is given, one
/// [`PublishEvent`] is sent per draft and per persisted artifact; the
/// sender is dropped before returning, so a receiver loop terminates once
/// the run is over.
pub fn run(
    config: &PipelineConfig,
    progress: Option<Sender<PublishEvent>>,
) -> Result<RunSummary, PipelineError> {
    config.validate()?;

    let now = Local::now().fixed_offset();
    let documents = prepare(derive_all(config, now)?, config);

    let mut summary = RunSummary::default();
    let (drafts, retained): (Vec<Document>, Vec<Document>) =
        documents.into_iter().partition(Document::is_draft);

    for draft in &drafts {
        summary.draft();
        send(
            &progress,
            PublishEvent::Draft {
                title: draft.title().to_string(),
                slug: draft.slug().to_string(),
            },
        );
    }

    match &config.output {
        OutputTarget::Dir(dir) => {
            ensure_distinct_slugs(&retained)?;
            let dir = PathBuf::from(shellexpand::tilde(dir).into_owned());
            let outcomes = retained
                .par_iter()
                .map(|document| {
                    let outcome = publish::write_document(document, &dir)?;
                    send(
                        &progress,
                        PublishEvent::Written {
                            title: document.title().to_string(),
                            slug: document.slug().to_string(),
                            outcome,
                            artifact: publish::document_path(&dir, document.slug()),
                        },
                    );
                    Ok(outcome)
                })
                .collect::<Result<Vec<_>, PublishError>>()?;
            for outcome in outcomes {
                summary.record(outcome);
            }
        }
        OutputTarget::File(file) => {
            let path = PathBuf::from(shellexpand::tilde(file).into_owned());
            let outcome = publish::write_collection(&retained, &path)?;
            summary.record(outcome);
            send(
                &progress,
                PublishEvent::Aggregated {
                    documents: retained.len(),
                    outcome,
                    artifact: path,
                },
            );
        }
    }

    Ok(summary)
}

/// Everything [`run`] does short of touching the output target.
pub fn check(config: &PipelineConfig) -> Result<CheckReport, PipelineError> {
    config.validate()?;
    let now = Local::now().fixed_offset();
    let documents = prepare(derive_all(config, now)?, config);
    Ok(CheckReport { documents })
}

/// Enumerate the source tree and derive every file in parallel.
fn derive_all(
    config: &PipelineConfig,
    now: DateTime<FixedOffset>,
) -> Result<Vec<Document>, PipelineError> {
    let files = scan::enumerate(config)?;
    let documents = files
        .par_iter()
        .map(|file| metadata::derive_document(file, config, now))
        .collect::<Result<Vec<_>, MetadataError>>()?;
    Ok(documents)
}

/// Locale filtering and translation linking. Both apply only in
/// multi-locale mode; a single-locale run keeps every document as derived.
fn prepare(mut documents: Vec<Document>, config: &PipelineConfig) -> Vec<Document> {
    if !config.multi_locale() {
        return documents;
    }
    documents.retain(|d| config.locales.iter().any(|l| l == d.locale()));
    translations::link(&mut documents, &config.default_locale);
    documents
}

/// Per-document output maps each slug to one artifact path, so duplicate
/// slugs among the retained documents would make parallel writers race on
/// a single file.
fn ensure_distinct_slugs(documents: &[Document]) -> Result<(), PipelineError> {
    let mut seen: HashMap<&str, &Document> = HashMap::new();
    for document in documents {
        if let Some(earlier) = seen.insert(document.slug(), document) {
            return Err(PipelineError::DuplicateSlug {
                slug: document.slug().to_string(),
                first: source_name(earlier),
                second: source_name(document),
            });
        }
    }
    Ok(())
}

fn source_name(document: &Document) -> String {
    let file = document.file();
    format!("{}.{}", file.name, file.extension)
}

fn send(progress: &Option<Sender<PublishEvent>>, event: PublishEvent) {
    if let Some(tx) = progress {
        // A dropped receiver only means nobody is listening
        let _ = tx.send(event);
    }
}
