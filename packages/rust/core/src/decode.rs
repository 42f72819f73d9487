//! Reading and decoding of individual source files.
//!
//! Strict UTF-8 first, Latin-1 second. Latin-1 assigns a character to every
//! byte, so once a file has been read its section always has text; only read
//! failures turn into placeholders. Decoded text always uses `\n` line
//! endings, matching the LF lines the writer emits around it.

use std::path::Path;

use tracing::{debug, warn};

/// Prefix of the placeholder written when a file cannot be read.
pub const READ_FAILURE_PREFIX: &str = "ERRO INESPERADO AO LER O ARQUIVO: ";

/// Body of one content section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    /// Valid UTF-8, with line endings normalised.
    Utf8(String),
    /// Invalid UTF-8, decoded byte-for-byte as ISO-8859-1.
    Latin1(String),
    /// The file could not be read; carries the message written instead.
    Placeholder(String),
}

impl SectionContent {
    /// Text that goes between the delimiters.
    pub fn text(&self) -> &str {
        match self {
            Self::Utf8(text) | Self::Latin1(text) | Self::Placeholder(text) => text,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Decode raw file bytes, falling back to Latin-1 on invalid UTF-8.
///
/// `\r\n` and lone `\r` become `\n` in both tiers. A leading BOM is kept.
pub fn decode_content(bytes: &[u8]) -> SectionContent {
    match std::str::from_utf8(bytes) {
        Ok(text) => SectionContent::Utf8(normalize_newlines(text)),
        Err(e) => {
            debug!(valid_up_to = e.valid_up_to(), "invalid UTF-8, using Latin-1");
            SectionContent::Latin1(normalize_newlines(&decode_latin1(bytes)))
        }
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read one file completely and decode it.
///
/// The handle is closed before this returns. Read errors never propagate.
pub fn read_section(path: &Path) -> SectionContent {
    match std::fs::read(path) {
        Ok(bytes) => decode_content(&bytes),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read source file");
            SectionContent::Placeholder(format!("{READ_FAILURE_PREFIX}{e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_keeps_bom_and_unifies_line_endings() {
        let text = "\u{feff}// Jogador\r\nclass Player { string s = \"ação\"; }\n";
        let content = decode_content(text.as_bytes());
        assert_eq!(
            content,
            SectionContent::Utf8("\u{feff}// Jogador\nclass Player { string s = \"ação\"; }\n".to_string())
        );
    }

    #[test]
    fn lf_only_text_is_unchanged() {
        let text = "class A\n{\n}\n";
        assert_eq!(decode_content(text.as_bytes()).text(), text);
    }

    #[test]
    fn crlf_and_lone_cr_become_lf() {
        let content = decode_content(b"class A\r\n{\r}\r\r\n");
        assert_eq!(content.text(), "class A\n{\n}\n\n");
        assert!(!content.text().contains('\r'));
    }

    #[test]
    fn latin1_line_endings_are_normalised_too() {
        let content = decode_content(&[b'/', b'/', 0xE9, b'\r', b'\n', b'x', b'\r']);
        assert_eq!(content, SectionContent::Latin1("//é\nx\n".to_string()));
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        // "ação" in ISO-8859-1.
        let bytes = [b'a', 0xE7, 0xE3, b'o'];
        let content = decode_content(&bytes);
        assert_eq!(content, SectionContent::Latin1("ação".to_string()));
        assert!(!content.is_placeholder());
    }

    #[test]
    fn latin1_covers_every_byte() {
        let bytes: Vec<u8> = (0x80..=0xFF).collect();
        let content = decode_content(&bytes);
        let SectionContent::Latin1(text) = content else {
            panic!("expected Latin-1 fallback");
        };
        assert_eq!(text.chars().count(), 128);
        assert_eq!(text.chars().next(), Some('\u{80}'));
        assert_eq!(text.chars().last(), Some('ÿ'));
    }

    #[test]
    fn empty_file_is_empty_text() {
        assert_eq!(decode_content(&[]).text(), "");
    }

    #[test]
    fn missing_file_becomes_placeholder() {
        let tmp = tempfile::tempdir().unwrap();
        let content = read_section(&tmp.path().join("Gone.cs"));
        assert!(content.is_placeholder());
        assert!(content.text().starts_with(READ_FAILURE_PREFIX));
    }

    #[test]
    fn reading_a_directory_becomes_placeholder() {
        let tmp = tempfile::tempdir().unwrap();
        let content = read_section(tmp.path());
        assert!(content.is_placeholder());
    }
}
