//! Source enumeration.
//!
//! Stage 1 of the publishing pipeline. Walks the content root and produces
//! the list of files the later stages normalize and publish.
//!
//! ## Layouts
//!
//! Two source layouts are supported, selected by `layout` in `quern.toml`:
//!
//! `posts` treats every content file in the root as a post. Subdirectories
//! are ignored:
//!
//! ```text
//! content/
//! ├── first-light.md
//! ├── second-thoughts.mdx
//! └── drafts/                  # not scanned
//! ```
//!
//! `site` treats root-level files as pages and files under `post/` as posts.
//! A content file anywhere else is an error:
//!
//! ```text
//! content/
//! ├── about.md                 # page
//! ├── colophon.md              # page
//! └── post/
//!     ├── first-light.md       # post
//!     └── second-thoughts.md   # post
//! ```
//!
//! Files come back in name order so downstream output is deterministic.
//! Hidden files and non-content extensions are skipped in both layouts.

use crate::config::{PipelineConfig, SourceLayout};
use crate::types::DocumentKind;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Content file in unsupported directory: {0}")]
    UnsupportedDirectory(PathBuf),
}

/// A content file discovered in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path, used to read the file in the derive stage.
    pub path: PathBuf,
    /// Filename without the extension. Fallback title and slug source.
    pub name: String,
    /// Lowercased extension, `md` or `mdx`.
    pub extension: String,
    /// What the file becomes, decided by where it sits in the layout.
    pub kind: DocumentKind,
}

const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Directory name that holds posts in the `site` layout.
const POST_DIR: &str = "post";

/// Enumerate all content files under the configured source root.
pub fn enumerate(config: &PipelineConfig) -> Result<Vec<SourceFile>, ScanError> {
    let root = PathBuf::from(shellexpand::tilde(&config.source).into_owned());
    match config.layout {
        SourceLayout::Posts => enumerate_posts(&root),
        SourceLayout::Site => enumerate_site(&root),
    }
}

/// Flat layout: every content file directly under the root is a post.
fn enumerate_posts(root: &Path) -> Result<Vec<SourceFile>, ScanError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && !is_hidden(p) && has_content_extension(p))
        .collect();

    paths.sort();

    Ok(paths
        .iter()
        .map(|p| source_file(p, DocumentKind::Post))
        .collect())
}

/// Site layout: root files are pages, files one level down in `post/` are
/// posts. A content file at any other depth is a hard error rather than a
/// silent skip, so a misplaced file cannot quietly vanish from the output.
fn enumerate_site(root: &Path) -> Result<Vec<SourceFile>, ScanError> {
    let mut files = Vec::new();

    // Depth 0 is the root itself, which a dotted temp dir name would
    // otherwise filter out.
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_content_extension(entry.path()) {
            continue;
        }

        let kind = match entry.depth() {
            1 => DocumentKind::Page,
            2 if in_post_directory(entry.path()) => DocumentKind::Post,
            _ => return Err(ScanError::UnsupportedDirectory(entry.into_path())),
        };

        files.push(source_file(entry.path(), kind));
    }

    Ok(files)
}

fn source_file(path: &Path, kind: DocumentKind) -> SourceFile {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    SourceFile {
        path: path.to_path_buf(),
        name,
        extension,
        kind,
    }
}

fn has_content_extension(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    CONTENT_EXTENSIONS.contains(&ext.as_str())
}

fn in_post_directory(path: &Path) -> bool {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy() == POST_DIR)
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn posts_config(root: &Path) -> PipelineConfig {
        PipelineConfig {
            source: root.to_string_lossy().to_string(),
            ..PipelineConfig::default()
        }
    }

    fn site_config(root: &Path) -> PipelineConfig {
        PipelineConfig {
            source: root.to_string_lossy().to_string(),
            layout: SourceLayout::Site,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn posts_layout_enumerates_root_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("zulu.md"), "z").unwrap();
        fs::write(tmp.path().join("alpha.md"), "a").unwrap();
        fs::write(tmp.path().join("mike.mdx"), "m").unwrap();

        let files = enumerate(&posts_config(tmp.path())).unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mike", "zulu"]);
        assert!(files.iter().all(|f| f.kind == DocumentKind::Post));
    }

    #[test]
    fn extension_is_matched_case_insensitively_and_normalized() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("SHOUTING.MD"), "loud").unwrap();

        let files = enumerate(&posts_config(tmp.path())).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "SHOUTING");
        assert_eq!(files[0].extension, "md");
    }

    #[test]
    fn non_content_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("real.md"), "hi").unwrap();
        fs::write(tmp.path().join("notes.txt"), "no").unwrap();
        fs::write(tmp.path().join("cover.png"), "no").unwrap();
        fs::write(tmp.path().join("extensionless"), "no").unwrap();

        let files = enumerate(&posts_config(tmp.path())).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "real");
    }

    #[test]
    fn hidden_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("visible.md"), "yes").unwrap();
        fs::write(tmp.path().join(".draft.md"), "no").unwrap();

        let files = enumerate(&posts_config(tmp.path())).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "visible");
    }

    #[test]
    fn posts_layout_ignores_subdirectories() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("kept.md"), "yes").unwrap();
        let nested = tmp.path().join("drafts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("ignored.md"), "no").unwrap();

        let files = enumerate(&posts_config(tmp.path())).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "kept");
    }

    #[test]
    fn site_layout_classifies_pages_and_posts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("about.md"), "page").unwrap();
        let posts = tmp.path().join("post");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("first-light.md"), "post").unwrap();

        let files = enumerate(&site_config(tmp.path())).unwrap();

        assert_eq!(files.len(), 2);

        let about = files.iter().find(|f| f.name == "about").unwrap();
        assert_eq!(about.kind, DocumentKind::Page);

        let post = files.iter().find(|f| f.name == "first-light").unwrap();
        assert_eq!(post.kind, DocumentKind::Post);
    }

    #[test]
    fn site_layout_rejects_unknown_directories() {
        let tmp = TempDir::new().unwrap();
        let misc = tmp.path().join("misc");
        fs::create_dir_all(&misc).unwrap();
        fs::write(misc.join("stray.md"), "lost").unwrap();

        let err = enumerate(&site_config(tmp.path())).unwrap_err();

        match err {
            ScanError::UnsupportedDirectory(path) => {
                assert!(path.ends_with("misc/stray.md"));
            }
            other => panic!("expected UnsupportedDirectory, got {other:?}"),
        }
    }

    #[test]
    fn site_layout_rejects_directories_nested_under_post() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("post").join("archive");
        fs::create_dir_all(&archive).unwrap();
        fs::write(archive.join("old.md"), "deep").unwrap();

        let result = enumerate(&site_config(tmp.path()));
        assert!(matches!(result, Err(ScanError::UnsupportedDirectory(_))));
    }

    #[test]
    fn site_layout_skips_non_content_files_anywhere() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("about.md"), "page").unwrap();
        let assets = tmp.path().join("assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("logo.svg"), "art").unwrap();

        let files = enumerate(&site_config(tmp.path())).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "about");
    }

    #[test]
    fn site_layout_skips_hidden_directories() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("about.md"), "page").unwrap();
        let hidden = tmp.path().join(".obsidian");
        fs::create_dir_all(&hidden).unwrap();
        fs::write(hidden.join("cache.md"), "no").unwrap();

        let files = enumerate(&site_config(tmp.path())).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "about");
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("nowhere");

        let result = enumerate(&posts_config(&gone));
        assert!(matches!(result, Err(ScanError::Io(_))));

        let result = enumerate(&site_config(&gone));
        assert!(matches!(result, Err(ScanError::Walk(_))));
    }

    #[test]
    fn name_and_path_are_preserved() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("hello-world.md"), "hi").unwrap();

        let files = enumerate(&posts_config(tmp.path())).unwrap();

        assert_eq!(files[0].name, "hello-world");
        assert_eq!(files[0].path, tmp.path().join("hello-world.md"));
    }
}
