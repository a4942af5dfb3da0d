use std::io;
use std::path::PathBuf;

use thiserror::Error;
use unitconf_common::ReadError;
use unitconf_parser::ParseError;

use crate::lexicon::SchemaError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot open `{path}`")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read lexicon schema `{path}`")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid lexicon schema `{path}`")]
    SchemaFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid log level `{value}` in {origin}")]
    LogLevel { origin: &'static str, value: String },

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Parse(#[from] ParseError<SchemaError>),

    #[error("cannot write output")]
    Output(#[from] io::Error),

    #[error("cannot render output")]
    Render(#[from] serde_json::Error),
}
