//! Core domain types for scriptbundle runs.

use std::fmt;
use std::path::{Path, PathBuf};

/// Extension of every generated bundle file.
pub const OUTPUT_EXTENSION: &str = "txt";

/// Highest version a 4-digit filename suffix can hold.
pub const MAX_VERSION: u32 = 9999;

// ---------------------------------------------------------------------------
// DiscoveredFile
// ---------------------------------------------------------------------------

/// A source file found under the root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    path: PathBuf,
    name: String,
}

impl DiscoveredFile {
    /// Wrap a discovered path, deriving its base name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    /// Path as discovered (root-joined).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base filename, used in the index and the delimiters.
    pub fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// VersionNumber
// ---------------------------------------------------------------------------

/// Run counter encoded in output filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionNumber(pub u32);

impl VersionNumber {
    /// Output filename for this version, e.g. `AllScripts0007.txt`.
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{base_name}{self}.{OUTPUT_EXTENSION}")
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovered_file_derives_base_name() {
        let file = DiscoveredFile::new("Assets/Scripts/Player/Player.cs");
        assert_eq!(file.name(), "Player.cs");
        assert_eq!(file.path(), Path::new("Assets/Scripts/Player/Player.cs"));
    }

    #[test]
    fn version_renders_zero_padded() {
        assert_eq!(VersionNumber(1).to_string(), "0001");
        assert_eq!(VersionNumber(42).file_name("AllScripts"), "AllScripts0042.txt");
        assert_eq!(VersionNumber(MAX_VERSION).file_name("B"), "B9999.txt");
    }
}
