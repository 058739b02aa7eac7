use std::collections::BTreeMap;
use std::io::Write;

use colored::Colorize;

use crate::cli::{load_book, wprintln};
use crate::MobiError;

/// Options for the `mobi fields` subcommand.
pub struct FieldsOptions {
    /// Path to the book file.
    pub file: String,
    /// Print only this field.
    pub name: Option<String>,
    /// Include fields that resolve to an empty value.
    pub all: bool,
    /// Emit output as JSON.
    pub json: bool,
}

/// Print EXTH metadata fields by name.
///
/// Without `--name`, walks the closed field table and prints every field,
/// skipping empty values unless `--all` is given. A field whose bytes
/// cannot be decoded is reported inline and does not stop the listing.
/// With `--name`, prints that single field's value and propagates its
/// error (including `UnknownField` for names outside the table).
pub fn execute(opts: &FieldsOptions, writer: &mut dyn Write) -> Result<(), MobiError> {
    let book = load_book(&opts.file)?;

    if let Some(name) = &opts.name {
        let value = book.field(name)?;
        if opts.json {
            let mut out = BTreeMap::new();
            out.insert(name.to_ascii_lowercase(), value);
            return write_json(&out, writer);
        }
        wprintln!(writer, "{}", value)?;
        return Ok(());
    }

    if opts.json {
        let mut out = BTreeMap::new();
        for name in book.field_names() {
            match book.field(name) {
                Ok(value) => {
                    if opts.all || !value.is_empty() {
                        out.insert(name.to_string(), value);
                    }
                }
                Err(MobiError::Decode(_)) => {}
                Err(e) => return Err(e),
            }
        }
        return write_json(&out, writer);
    }

    for name in book.field_names() {
        match book.field(name) {
            Ok(value) => {
                if opts.all || !value.is_empty() {
                    wprintln!(writer, "{}: {}", format!("{:>15}", name).bold(), value)?;
                }
            }
            Err(MobiError::Decode(e)) => {
                // Per-field decode failures must not hide other fields.
                wprintln!(
                    writer,
                    "{}: {}",
                    format!("{:>15}", name).bold(),
                    format!("<{}>", e).red()
                )?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn write_json(out: &BTreeMap<String, String>, writer: &mut dyn Write) -> Result<(), MobiError> {
    let json = serde_json::to_string_pretty(out)
        .map_err(|e| MobiError::Io(format!("Cannot serialize JSON: {}", e)))?;
    wprintln!(writer, "{}", json)
}
