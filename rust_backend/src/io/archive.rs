//! ZIP packaging for generated calendar documents.

use anyhow::{Context, Result};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// File name under which the bundled archive is offered.
pub const ARCHIVE_NAME: &str = "alle_docenten.ics.zip";

/// Bundle calendar documents into an in-memory ZIP archive.
///
/// Each `(teacher, document)` pair becomes a member named `{teacher}.ics`,
/// in the order the pairs are given.
pub fn write_zip(documents: &[(String, String)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (teacher, document) in documents {
        let member = format!("{}.ics", teacher);
        zip.start_file(member.as_str(), options)
            .with_context(|| format!("Failed to start archive member for '{}'", teacher))?;
        zip.write_all(document.as_bytes())
            .with_context(|| format!("Failed to write archive member for '{}'", teacher))?;
    }

    let cursor = zip.finish().context("Failed to finalize archive")?;
    Ok(cursor.into_inner())
}
