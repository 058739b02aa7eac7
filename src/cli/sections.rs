use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{load_book, wprintln};
use crate::MobiError;

/// Options for the `mobi sections` subcommand.
pub struct SectionsOptions {
    /// Path to the book file.
    pub file: String,
    /// Emit output as JSON.
    pub json: bool,
}

#[derive(Serialize)]
struct SectionJson {
    index: usize,
    offset: u32,
    length: usize,
    flags: u8,
    unique_id: u32,
}

/// List the PDB section directory: index, file offset, derived length,
/// flags, and unique ID for every section.
///
/// Lengths are derived the same way the parser slices sections — from
/// each offset to the next, or to end-of-file for the last entry — so a
/// directory with bad offsets shows up here as a length error.
pub fn execute(opts: &SectionsOptions, writer: &mut dyn Write) -> Result<(), MobiError> {
    let book = load_book(&opts.file)?;
    let descriptors = book.sections().descriptors();

    if opts.json {
        let mut out = Vec::with_capacity(descriptors.len());
        for (index, desc) in descriptors.iter().enumerate() {
            out.push(SectionJson {
                index,
                offset: desc.offset,
                length: book.section(index)?.len(),
                flags: desc.flags,
                unique_id: desc.unique_id,
            });
        }
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| MobiError::Io(format!("Cannot serialize JSON: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(
        writer,
        "{}",
        format!(
            "{:>7}  {:>10}  {:>10}  {:>5}  {:>9}",
            "section", "offset", "length", "flags", "unique_id"
        )
        .bold()
    )?;
    for (index, desc) in descriptors.iter().enumerate() {
        let length = match book.section(index) {
            Ok(bytes) => bytes.len().to_string(),
            Err(_) => "invalid".red().to_string(),
        };
        wprintln!(
            writer,
            "{:>7}  {:>10}  {:>10}  {:>5}  {:>9}",
            index,
            desc.offset,
            length,
            desc.flags,
            desc.unique_id
        )?;
    }

    Ok(())
}
