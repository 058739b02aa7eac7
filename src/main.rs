#[cfg(not(feature = "cli"))]
compile_error!("The `mobi` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::process;

use mobi::cli;
use mobi::cli::app::{Cli, ColorMode, Commands};
use mobi::MobiError;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, MobiError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| MobiError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Info { file, json } => {
            cli::info::execute(&cli::info::InfoOptions { file, json }, &mut writer)
        }
        Commands::Fields {
            file,
            name,
            all,
            json,
        } => cli::fields::execute(
            &cli::fields::FieldsOptions {
                file,
                name,
                all,
                json,
            },
            &mut writer,
        ),
        Commands::Sections { file, json } => cli::sections::execute(
            &cli::sections::SectionsOptions { file, json },
            &mut writer,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
