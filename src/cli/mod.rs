//! CLI subcommand implementations for the `mobi` binary.
//!
//! CLI argument parsing uses clap derive macros, with the top-level
//! [`app::Cli`] struct and [`app::Commands`] enum defined in [`app`] and
//! shared between `main.rs` and `build.rs` (for man page generation) via
//! `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct
//! holding the parsed arguments and a `pub fn execute(opts, writer) ->
//! Result<(), MobiError>` entry point. The `writer: &mut dyn Write`
//! parameter allows output to be captured in tests or redirected to a
//! file via the global `--output` flag.
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `mobi info` | [`info`] | Title and document header summary |
//! | `mobi fields` | [`fields`] | List metadata fields, or look one up by name |
//! | `mobi sections` | [`sections`] | List PDB section descriptors |

pub mod app;
pub mod fields;
pub mod info;
pub mod sections;

/// Write a line to the given writer, converting io::Error to MobiError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::MobiError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::MobiError::Io(e.to_string()))
    };
}

pub(crate) use wprintln;

use crate::mobi::book::MobiBook;
use crate::MobiError;

/// Read a book file fully into memory and parse it.
///
/// The parsing core takes bytes, never paths; this is the single place
/// the CLI does file I/O for book input.
pub(crate) fn load_book(path: &str) -> Result<MobiBook, MobiError> {
    let data =
        std::fs::read(path).map_err(|e| MobiError::Io(format!("Cannot read {}: {}", path, e)))?;
    MobiBook::from_bytes(data)
}
