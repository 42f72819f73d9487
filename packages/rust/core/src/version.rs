//! Output version resolution.
//!
//! Bundles are named `<base><NNNN>.txt`. The next run always gets one more
//! than the highest version already present in the output directory.

use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};

use scriptbundle_shared::{
    MAX_VERSION, OUTPUT_EXTENSION, Result, ScriptBundleError, VersionNumber,
};

/// Extract the version from a bundle filename, if it is one.
///
/// Only exact `<base><4 ASCII digits>.txt` names match; the base is taken
/// literally.
pub fn parse_version(file_name: &str, base_name: &str) -> Option<u32> {
    let pattern = version_pattern(base_name).ok()?;
    capture_version(&pattern, file_name)
}

fn version_pattern(base_name: &str) -> Result<Regex> {
    let pattern = format!(
        r"^{}([0-9]{{4}})\.{}$",
        regex::escape(base_name),
        OUTPUT_EXTENSION
    );
    Regex::new(&pattern)
        .map_err(|e| ScriptBundleError::validation(format!("bad version pattern: {e}")))
}

fn capture_version(pattern: &Regex, file_name: &str) -> Option<u32> {
    pattern
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Create `output_dir` if needed and return the next free version.
#[instrument(skip_all, fields(output_dir = %output_dir.display(), base_name = %base_name))]
pub fn next_version(output_dir: &Path, base_name: &str) -> Result<VersionNumber> {
    std::fs::create_dir_all(output_dir).map_err(|e| ScriptBundleError::io(output_dir, e))?;

    let pattern = version_pattern(base_name)?;
    let mut highest = 0u32;

    let entries = std::fs::read_dir(output_dir).map_err(|e| ScriptBundleError::io(output_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ScriptBundleError::io(output_dir, e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(version) = capture_version(&pattern, name) else {
            continue;
        };
        debug!(file = name, version, "found previous bundle");
        highest = highest.max(version);
    }

    if highest >= MAX_VERSION {
        return Err(ScriptBundleError::VersionExhausted {
            base_name: base_name.to_string(),
            max: MAX_VERSION,
        });
    }

    let next = VersionNumber(highest + 1);
    debug!(%next, "resolved next version");
    Ok(next)
}
