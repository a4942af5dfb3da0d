//! unitconf - inspect unit configuration files
//!
//! Dumps the tokens or statements of a file, or parses it into sections
//! with a lexicon described by a JSON schema.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, Level};
use unitconf_common::ReaderSource;
use unitconf_lexer::Lexer;

mod config;
mod error;
mod lexicon;
mod logging;
mod render;

use crate::config::{LexiconSchema, LogConfig, LOG_ENV};
use crate::error::CliError;
use crate::lexicon::build_lexicon;
use crate::logging::LogFormat;
use crate::render::OutputFormat;

#[derive(Parser)]
#[command(name = "unitconf", about = "Inspect unit configuration files", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    log: LogArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Print every token with its span
    Tokens {
        /// Input file; stdin when omitted or `-`
        file: Option<PathBuf>,
    },
    /// Print every statement with its position
    Statements {
        /// Input file; stdin when omitted or `-`
        file: Option<PathBuf>,
    },
    /// Parse into sections and print the unit
    Parse {
        /// Input file; stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Lexicon schema (JSON); the built-in init lexicon when omitted
        #[arg(long, value_name = "SCHEMA")]
        lexicon: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct LogArgs {
    /// Global log level (overrides UNITCONF_LOG)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<Level>,
    /// Log level for the lexer
    #[arg(long, global = true, value_name = "LEVEL")]
    lexer_log_level: Option<Level>,
    /// Log level for the parser
    #[arg(long, global = true, value_name = "LEVEL")]
    parser_log_level: Option<Level>,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

fn main() {
    let cli = Cli::parse();

    let env = std::env::var(LOG_ENV).ok();
    let log_config = match LogConfig::resolve(
        cli.log.log_level,
        cli.log.lexer_log_level,
        cli.log.parser_log_level,
        env.as_deref(),
    ) {
        Ok(config) => config,
        Err(err) => exit_with(&err),
    };
    logging::init(&log_config, cli.log.log_format);

    if let Err(err) = run(cli.command) {
        exit_with(&err);
    }
}

fn run(command: Command) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Tokens { file } => {
            for token in Lexer::new(open_input(file.as_deref())?) {
                writeln!(out, "{}", token?)?;
            }
        }
        Command::Statements { file } => {
            for stmt in unitconf_parser::Parser::new(open_input(file.as_deref())?) {
                let stmt = stmt?;
                writeln!(out, "{} {:?}", stmt.position(), stmt.fields())?;
            }
        }
        Command::Parse {
            file,
            lexicon,
            format,
        } => {
            let schema = match lexicon {
                Some(path) => LexiconSchema::load(&path)?,
                None => LexiconSchema::builtin(),
            };
            let lexicon = build_lexicon(&schema);
            let unit = match unitconf_parser::parse(open_input(file.as_deref())?, &lexicon) {
                Ok(unit) => unit,
                Err(failure) => {
                    debug!(
                        target: "unitconf::cli",
                        sections = failure.unit.len(),
                        pending_lines = failure.pending.len(),
                        "parse aborted"
                    );
                    return Err(failure.into_error().into());
                }
            };
            match format {
                OutputFormat::Text => render::write_text(&mut out, &unit)?,
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &render::to_json(&unit))?;
                    writeln!(out)?;
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Opens `file`, or stdin for `None` and `-`.
fn open_input(file: Option<&Path>) -> Result<ReaderSource<Box<dyn BufRead>>, CliError> {
    let reader: Box<dyn BufRead> = match file {
        None => Box::new(io::stdin().lock()),
        Some(path) if path == Path::new("-") => Box::new(io::stdin().lock()),
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(BufReader::new(file))
        }
    };
    Ok(ReaderSource::new(reader))
}

fn exit_with(err: &CliError) -> ! {
    eprintln!("Error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    process::exit(1);
}
