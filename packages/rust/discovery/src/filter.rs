//! Name-based entry filters used while walking the root directory.

use std::ffi::OsStr;

/// Dot-prefixed names, which a shell `**/*.ext` glob never expands into.
pub(crate) fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Case-sensitive suffix match against a normalized extension (`.cs`).
///
/// A name that is nothing but the extension is not a match.
pub(crate) fn matches_extension(name: &OsStr, extension: &str) -> bool {
    let name = name.as_encoded_bytes();
    let ext = extension.as_bytes();
    name.len() > ext.len() && name.ends_with(ext)
}
