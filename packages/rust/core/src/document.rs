//! Bundle document writer.
//!
//! Layout of every bundle:
//! ```text
//! ====  header  ====
//! 1. First.cs
//! 2. Second.cs
//! ==== reading instructions (constant) ====
//! ----- Início Script "First.cs" -----
//! <content>
//! ----- Final Script "First.cs" -----
//! ...
//! ```
//! The exact bytes are fixed; identical inputs give identical bundles.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, instrument};

use scriptbundle_shared::{DiscoveredFile, Result, ScriptBundleError};

use crate::decode::{SectionContent, read_section};
use crate::pipeline::ProgressReporter;

/// Width of the `=` separator lines.
pub const SEPARATOR_WIDTH: usize = 80;

const INDEX_TITLE: &str = "ÍNDICE DE SCRIPTS C# COMPILADOS (do projeto Unity)";
const INSTRUCTIONS_TITLE: &str = "INSTRUÇÕES DE LEITURA";
const INSTRUCTIONS: &str = "Cada script individual está separado pelas marcações abaixo. \
Cada separação representa um script individual e deve ser tratada dessa forma quando a leitura for feita.";
const EXAMPLE_NAME: &str = "NomeDoScript.cs";
const EXAMPLE_BODY: &str = "... conteúdo do script C# ...";

/// Counters collected while writing a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub sections: usize,
    pub latin1_fallbacks: usize,
    pub placeholders: usize,
    pub bytes_written: u64,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Opening marker for a section.
pub fn start_delimiter(name: &str) -> String {
    format!("----- Início Script \"{name}\" -----")
}

/// Closing marker for a section.
pub fn end_delimiter(name: &str) -> String {
    format!("----- Final Script \"{name}\" -----")
}

fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Header, numbered index and the reading instructions.
pub fn write_preamble<W: Write>(out: &mut W, files: &[DiscoveredFile]) -> io::Result<()> {
    let sep = separator();

    writeln!(out, "{sep}")?;
    writeln!(out, "{INDEX_TITLE}")?;
    writeln!(out, "{sep}")?;
    writeln!(out)?;

    for (i, file) in files.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, file.name())?;
    }
    write!(out, "\n\n")?;

    writeln!(out, "{sep}")?;
    writeln!(out, "{INSTRUCTIONS_TITLE}")?;
    writeln!(out, "{sep}")?;
    writeln!(out)?;
    write!(out, "{INSTRUCTIONS}\n\n")?;
    writeln!(out, "{}", start_delimiter(EXAMPLE_NAME))?;
    writeln!(out, "{EXAMPLE_BODY}")?;
    write!(out, "{}\n\n", end_delimiter(EXAMPLE_NAME))?;
    write!(out, "{sep}\n\n\n")
}

/// One delimited content section.
pub fn write_section<W: Write>(out: &mut W, name: &str, content: &str) -> io::Result<()> {
    write!(out, "{}\n\n", start_delimiter(name))?;
    out.write_all(content.as_bytes())?;
    write!(out, "\n\n")?;
    write!(out, "{}\n\n\n", end_delimiter(name))
}

// ---------------------------------------------------------------------------
// File output
// ---------------------------------------------------------------------------

/// Write the full bundle for `files` to `path`, replacing any existing file.
///
/// Sources are read one at a time; unreadable ones get a placeholder
/// section. Only failures on the output file are returned as errors.
#[instrument(skip_all, fields(path = %path.display(), files = files.len()))]
pub fn write_document(
    path: &Path,
    files: &[DiscoveredFile],
    progress: &dyn ProgressReporter,
) -> Result<DocumentStats> {
    let io_err = |e: io::Error| ScriptBundleError::io(path, e);

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);

    write_preamble(&mut out, files).map_err(io_err)?;

    let mut stats = DocumentStats::default();
    for (i, source) in files.iter().enumerate() {
        let content = read_section(source.path());
        match &content {
            SectionContent::Utf8(_) => {}
            SectionContent::Latin1(_) => stats.latin1_fallbacks += 1,
            SectionContent::Placeholder(_) => stats.placeholders += 1,
        }

        write_section(&mut out, source.name(), content.text()).map_err(io_err)?;
        stats.sections += 1;

        debug!(file = %source.path().display(), "section written");
        progress.file_written(source.name(), i + 1, files.len());
    }

    let file = out.into_inner().map_err(|e| io_err(e.into_error()))?;
    file.sync_all().map_err(io_err)?;
    stats.bytes_written = file.metadata().map_err(io_err)?.len();

    info!(
        sections = stats.sections,
        latin1_fallbacks = stats.latin1_fallbacks,
        placeholders = stats.placeholders,
        bytes = stats.bytes_written,
        "bundle written"
    );

    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
