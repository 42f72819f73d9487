//! End-to-end bundle pipeline: discover → resolve version → write document.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use scriptbundle_discovery::{DiscoveryOptions, DiscoveryResult, discover_files};
use scriptbundle_shared::{BundleConfig, Result, VersionNumber};

use crate::document::write_document;
use crate::version::next_version;

/// Summary of a run that produced a bundle.
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Path of the bundle that was written.
    pub output_path: PathBuf,
    /// Version encoded in the filename.
    pub version: VersionNumber,
    /// Number of source files bundled.
    pub file_count: usize,
    /// Sections decoded with the Latin-1 fallback.
    pub latin1_fallbacks: usize,
    /// Sections replaced by a read-failure placeholder.
    pub placeholders: usize,
    /// Size of the bundle on disk.
    pub bytes_written: u64,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Terminal state of a run.
#[derive(Debug, Clone)]
pub enum BundleOutcome {
    /// No matching files under the root; nothing was written.
    NoFilesFound { root: PathBuf, extension: String },
    /// A new bundle was written.
    Written(BundleReport),
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each section is written.
    fn file_written(&self, name: &str, current: usize, total: usize);
    /// Called when a bundle has been written.
    fn done(&self, report: &BundleReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_written(&self, _name: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &BundleReport) {}
}

/// Run the full bundle pipeline.
///
/// 1. Discover source files under `root_dir`
/// 2. Stop with [`BundleOutcome::NoFilesFound`] if there are none
/// 3. Resolve the next version in `output_dir` (creating it)
/// 4. Write `<base_name><NNNN>.txt`
///
/// Discovery runs first so an empty run neither creates the output
/// directory nor uses up a version.
#[instrument(skip_all, fields(root = %config.root_dir.display(), output = %config.output_dir.display()))]
pub fn run_bundle(
    config: &BundleConfig,
    progress: &dyn ProgressReporter,
) -> Result<BundleOutcome> {
    let start = Instant::now();
    config.validate()?;

    let extension = config.normalized_extension();

    // --- Phase 1: Discovery ---
    progress.phase("Discovering source files");
    let opts = DiscoveryOptions {
        extension: extension.clone(),
        include_hidden: config.include_hidden,
    };
    let files = match discover_files(&config.root_dir, &opts) {
        DiscoveryResult::Found(files) => files,
        DiscoveryResult::Empty => {
            info!(%extension, "no matching files, nothing to write");
            return Ok(BundleOutcome::NoFilesFound {
                root: config.root_dir.clone(),
                extension,
            });
        }
    };

    // --- Phase 2: Version ---
    progress.phase("Resolving output version");
    let version = next_version(&config.output_dir, &config.base_name)?;
    let output_path = config.output_dir.join(version.file_name(&config.base_name));

    info!(%version, path = %output_path.display(), files = files.len(), "writing bundle");

    // --- Phase 3: Document ---
    progress.phase("Writing bundle");
    let stats = write_document(&output_path, &files, progress)?;

    let report = BundleReport {
        output_path,
        version,
        file_count: stats.sections,
        latin1_fallbacks: stats.latin1_fallbacks,
        placeholders: stats.placeholders,
        bytes_written: stats.bytes_written,
        elapsed: start.elapsed(),
    };
    progress.done(&report);

    Ok(BundleOutcome::Written(report))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
