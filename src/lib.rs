//! MOBI/Kindle e-book metadata extraction toolkit.
//!
//! The `mobi-utils` crate (library name `mobi`) provides Rust types and
//! functions for decoding the metadata carried by MOBI/AZW e-book files:
//! the enclosing PDB section archive, the fixed-layout MOBI header in
//! section 0, and the variable-length EXTH metadata block (title, author,
//! publisher, identifiers, and so on). It performs no DRM handling and no
//! content decompression — DRM and compression header fields are decoded
//! and exposed for display only.
//!
//! # CLI Reference
//!
//! Install the `mobi` binary and use its subcommands to inspect books from
//! the command line.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`mobi info`](cli::app::Commands::Info) | Title and document header summary |
//! | [`mobi fields`](cli::app::Commands::Fields) | List EXTH metadata fields, or look one up by name |
//! | [`mobi sections`](cli::app::Commands::Sections) | List PDB section descriptors |
//!
//! All subcommands accept `--color <auto|always|never>`, `--output <file>`,
//! and `--json` for machine-readable output.
//!
//! # Library API
//!
//! ## Quick example
//!
//! ```no_run
//! use mobi::mobi::book::MobiBook;
//!
//! let data = std::fs::read("book.azw").unwrap();
//! let book = MobiBook::from_bytes(data).unwrap();
//!
//! println!("Title: {}", book.title().unwrap());
//! println!("Publisher: {}", book.field("publisher").unwrap());
//! println!("MOBI version: {}", book.header().version);
//! ```
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`mobi::book`] | [`MobiBook`](mobi::book::MobiBook), the parsing session and query surface |
//! | [`mobi::pdb`] | PDB archive header and section table |
//! | [`mobi::header`] | Fixed-layout MOBI document header (section 0) |
//! | [`mobi::exth`] | EXTH tagged metadata record block |
//! | [`mobi::fields`] | Field name table, numeric conversions, codepage handling |
//! | [`mobi::types`] | Compression and crypto code enums |
//! | [`mobi::constants`] | PDB/MOBI/EXTH byte-layout constants |

#[cfg(feature = "cli")]
pub mod cli;
pub mod mobi;

use thiserror::Error;

/// Errors returned by `mobi` operations.
#[derive(Error, Debug)]
pub enum MobiError {
    /// An I/O error occurred (file open, read, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// The document is not a MOBI container, or a structure it declares
    /// does not fit in the buffer. Fatal: no book object is produced.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The EXTH metadata block is malformed. Absorbed during header
    /// parsing (the book loads with empty metadata); only surfaced by
    /// [`mobi::exth::parse`] itself.
    #[error("EXTH parse error: {0}")]
    ExthParse(String),

    /// A field name not present in the static name table was requested.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Raw field bytes could not be decoded under the resolved encoding,
    /// or a numeric field payload has the wrong width.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An invalid argument was supplied (out-of-range section index, bad
    /// option, etc.).
    #[error("Invalid argument: {0}")]
    Argument(String),
}
