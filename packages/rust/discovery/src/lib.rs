//! Source file discovery.
//!
//! Walks the configured root directory and collects every file whose name
//! ends in the target extension. The result is ordered by full path string,
//! which fixes both the index numbering and the order of the content
//! sections in the bundle.

mod filter;

use std::io;
use std::path::Path;

use scriptbundle_shared::DiscoveredFile;
use tracing::{debug, info, instrument, warn};
use walkdir::{DirEntry, WalkDir};

// ---------------------------------------------------------------------------
// DiscoveryResult
// ---------------------------------------------------------------------------

/// Outcome of a discovery walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryResult {
    /// At least one matching file, sorted by full path.
    Found(Vec<DiscoveredFile>),
    /// Nothing matched; the caller should stop without writing output.
    Empty,
}

impl DiscoveryResult {
    /// Number of files found.
    pub fn len(&self) -> usize {
        match self {
            Self::Found(files) => files.len(),
            Self::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

// ---------------------------------------------------------------------------
// Discovery options
// ---------------------------------------------------------------------------

/// Configuration for a discovery walk.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Normalized extension with a leading dot, e.g. `.cs`.
    pub extension: String,
    /// Collect dot-files and descend into dot-directories.
    pub include_hidden: bool,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Recursively collect files under `root` matching `opts.extension`.
///
/// Symlinked directories are followed. A missing root is reported as
/// [`DiscoveryResult::Empty`]. Unreadable subdirectories and symlink loops
/// are logged and skipped.
#[instrument(skip_all, fields(root = %root.display(), extension = %opts.extension))]
pub fn discover_files(root: &Path, opts: &DiscoveryOptions) -> DiscoveryResult {
    if !root.is_dir() {
        info!("root directory not found");
        return DiscoveryResult::Empty;
    }

    let include_hidden = opts.include_hidden;
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(move |entry| include_hidden || entry.depth() == 0 || !is_hidden(entry));

    let mut files: Vec<DiscoveredFile> = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Following a dangling link fails, but the link itself is
                // still an entry; the writer reports it as unreadable.
                if let Some(link) = dangling_link(&e) {
                    let name = link.file_name().unwrap_or_default();
                    if (include_hidden || !filter::is_hidden(name))
                        && filter::matches_extension(name, &opts.extension)
                    {
                        debug!(path = %link.display(), "discovered dangling link");
                        files.push(DiscoveredFile::new(link));
                    }
                    continue;
                }
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir()
            || !filter::matches_extension(entry.file_name(), &opts.extension)
        {
            continue;
        }

        debug!(path = %entry.path().display(), "discovered file");
        files.push(DiscoveredFile::new(entry.into_path()));
    }

    sort_by_path(&mut files);

    info!(count = files.len(), "discovery complete");

    if files.is_empty() {
        DiscoveryResult::Empty
    } else {
        DiscoveryResult::Found(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    filter::is_hidden(entry.file_name())
}

/// Path of a symlink whose target does not exist, if that caused `err`.
fn dangling_link(err: &walkdir::Error) -> Option<&Path> {
    let path = err.path()?;
    let target_missing = err
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    let is_link = path
        .symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink());
    (target_missing && is_link).then_some(path)
}

/// Byte-wise order of the full path string, not component-wise `Path` order.
fn sort_by_path(files: &mut [DiscoveredFile]) {
    files.sort_by(|a, b| a.path().as_os_str().cmp(b.path().as_os_str()));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
