use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{load_book, wprintln};
use crate::MobiError;

/// Options for the `mobi info` subcommand.
pub struct InfoOptions {
    /// Path to the book file.
    pub file: String,
    /// Emit output as JSON.
    pub json: bool,
}

#[derive(Serialize)]
struct InfoJson {
    file: String,
    title: String,
    compression: String,
    mobi_version: u32,
    codepage: u32,
    encoding: String,
    crypto_type: String,
    drm_offset: u32,
    drm_count: u32,
    drm_size: u32,
    text_records: u16,
    first_image_index: u32,
    extra_data_flags: u16,
    sections: usize,
    metadata_records: usize,
}

/// Display the resolved title and the MOBI header summary for one book.
///
/// Shows the informational header fields the core exposes: compression
/// scheme, format version, codepage and the encoding it resolves to,
/// crypto type, the DRM descriptor, record counts, and how many EXTH
/// metadata records were indexed. DRM fields are display-only; nothing
/// here decrypts or decompresses content.
pub fn execute(opts: &InfoOptions, writer: &mut dyn Write) -> Result<(), MobiError> {
    let book = load_book(&opts.file)?;
    let header = book.header();
    let title = book.title()?;

    if opts.json {
        let out = InfoJson {
            file: opts.file.clone(),
            title,
            compression: header.compression.name(),
            mobi_version: header.version,
            codepage: header.codepage,
            encoding: book.encoding().name().to_string(),
            crypto_type: header.crypto_type.name(),
            drm_offset: header.drm.offset,
            drm_count: header.drm.count,
            drm_size: header.drm.size,
            text_records: header.txt_records,
            first_image_index: header.first_image_index,
            extra_data_flags: header.extra_data_flags,
            sections: book.sections().len(),
            metadata_records: book.metadata().len(),
        };
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| MobiError::Io(format!("Cannot serialize JSON: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(writer, "{}: {}", label("File"), opts.file)?;
    wprintln!(writer, "{}: {}", label("Title"), title)?;
    wprintln!(writer, "{}: {}", label("Compression"), header.compression)?;
    wprintln!(writer, "{}: {}", label("Version"), header.version)?;
    wprintln!(
        writer,
        "{}: {} ({})",
        label("Codepage"),
        header.codepage,
        book.encoding().name()
    )?;
    if header.crypto_type.is_encrypted() {
        wprintln!(
            writer,
            "{}: {}",
            label("Encryption"),
            header.crypto_type.name().red()
        )?;
        wprintln!(
            writer,
            "{}: offset {}, count {}, size {}",
            label("DRM"),
            header.drm.offset,
            header.drm.count,
            header.drm.size
        )?;
    } else {
        wprintln!(writer, "{}: {}", label("Encryption"), "none".green())?;
    }
    wprintln!(writer, "{}: {}", label("Text records"), header.txt_records)?;
    wprintln!(
        writer,
        "{}: {}",
        label("First image"),
        header.first_image_index
    )?;
    wprintln!(writer, "{}: {}", label("Sections"), book.sections().len())?;
    wprintln!(
        writer,
        "{}: {}",
        label("EXTH records"),
        book.metadata().len()
    )?;

    Ok(())
}

/// Right-align a label to the original's 15-column gutter, then bold it.
/// Padding happens before colorizing so ANSI codes don't skew the width.
fn label(name: &str) -> colored::ColoredString {
    format!("{:>15}", name).bold()
}
