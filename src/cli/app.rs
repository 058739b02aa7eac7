use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "mobi")]
#[command(about = "MOBI/Kindle e-book metadata extraction toolkit")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the title and a document header summary
    Info {
        /// Path to a MOBI/AZW book file
        file: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List metadata fields, or look one up by name
    Fields {
        /// Path to a MOBI/AZW book file
        file: String,

        /// Print a single field (e.g. publisher, isbn, asin)
        #[arg(short, long)]
        name: Option<String>,

        /// Include fields with empty values
        #[arg(short, long)]
        all: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List PDB section descriptors
    Sections {
        /// Path to a MOBI/AZW book file
        file: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}
