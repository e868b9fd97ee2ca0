//! Pipeline configuration module.
//!
//! Handles loading and validating `quern.toml`. Configuration is a single
//! flat file — the pipeline runs against exactly one source tree and one
//! output target per invocation.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source = "content"        # Source directory (~/ is resolved)
//! layout = "posts"          # "posts" (flat, posts only) or "site" (pages + post/)
//! default_locale = "en"
//! locales = ["en"]          # More than one entry enables multi-locale mode
//!
//! [output]
//! dir = "public/content"    # Per-document mode: {dir}/{slug}.json, hash-gated
//! # file = "public/content.json"  # Aggregate mode: one JSON array, always rewritten
//! ```
//!
//! The two output modes are mutually exclusive; `[output]` takes exactly one
//! key. Unknown keys anywhere are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// How content files are arranged under the source root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLayout {
    /// Flat directory of posts. Subdirectories are ignored.
    #[default]
    Posts,
    /// Files in the root are pages, files under `post/` are posts, and a
    /// content file anywhere else fails the run.
    Site,
}

/// Output mode: one artifact per document, or one aggregate artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Per-document mode: `{dir}/{slug}.json`, write gated on content hash.
    Dir(String),
    /// Aggregate mode: one JSON array at this path, always rewritten.
    File(String),
}

/// Pipeline configuration loaded from `quern.toml`.
///
/// All fields have defaults, so an empty file is a valid configuration.
/// Unknown keys are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Source directory holding the markdown content. A leading `~/` is
    /// resolved by the enumerator.
    pub source: String,
    /// Source tree layout.
    pub layout: SourceLayout,
    /// Output target and mode.
    pub output: OutputTarget,
    /// Locale assigned to documents whose header declares none.
    pub default_locale: String,
    /// Locale allow-list. More than one entry enables multi-locale mode:
    /// out-of-list documents are dropped and translations are linked.
    pub locales: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: "content".to_string(),
            layout: SourceLayout::default(),
            output: OutputTarget::Dir("public/content".to_string()),
            default_locale: "en".to_string(),
            locales: vec!["en".to_string()],
        }
    }
}

impl PipelineConfig {
    /// Validate config values. Runs before any file I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.trim().is_empty() {
            return Err(ConfigError::Validation("source must not be empty".into()));
        }
        match &self.output {
            OutputTarget::Dir(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::Validation(
                    "output.dir must not be empty".into(),
                ));
            }
            OutputTarget::File(file) if file.trim().is_empty() => {
                return Err(ConfigError::Validation(
                    "output.file must not be empty".into(),
                ));
            }
            _ => {}
        }
        if self.locales.is_empty() {
            return Err(ConfigError::Validation("locales must not be empty".into()));
        }
        if self.locales.iter().any(|l| l.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "locales entries must not be blank".into(),
            ));
        }
        for (i, locale) in self.locales.iter().enumerate() {
            if self.locales[..i].contains(locale) {
                return Err(ConfigError::Validation(format!(
                    "duplicate locale '{locale}' in locales"
                )));
            }
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(ConfigError::Validation(format!(
                "default_locale '{}' must be listed in locales",
                self.default_locale
            )));
        }
        // Translated documents share a slug, so {dir}/{slug}.json would collide
        if matches!(self.output, OutputTarget::Dir(_)) && self.locales.len() > 1 {
            return Err(ConfigError::Validation(
                "per-document output supports a single locale; use `output.file` for multi-locale content".into(),
            ));
        }
        Ok(())
    }

    /// More than one locale configured.
    pub fn multi_locale(&self) -> bool {
        self.locales.len() > 1
    }
}

/// Load `quern.toml` from `path`, reject unknown keys, validate the result.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: PipelineConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `quern.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# quern configuration
# ===================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Source directory holding markdown content. A leading ~/ is resolved.
source = "content"

# Source tree layout:
#   "posts" - flat directory, every file is a post, subdirectories ignored
#   "site"  - root files are pages, post/ holds posts, anything else is an error
layout = "posts"

# Locale assigned to documents whose frontmatter declares none.
default_locale = "en"

# Locale allow-list. Listing more than one locale enables multi-locale mode:
# documents outside the list are dropped and translations are cross-linked.
# Multi-locale content requires the aggregate output mode below.
locales = ["en"]

# ---------------------------------------------------------------------------
# Output target - exactly one of `dir` or `file`
# ---------------------------------------------------------------------------
[output]
# Per-document mode: one {slug}.json per document, rewritten only when its
# content hash changes.
dir = "public/content"

# Aggregate mode: every document in one JSON array, rewritten on every run.
# file = "public/content.json"
"##
}
