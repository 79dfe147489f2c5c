//! Error type for the demo driver binary, following `knhk-cli::error::CliError`'s
//! shape: one `thiserror` enum, `#[from]` for the lower layers it wraps.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] tas_config::ConfigError),

    #[error("failed to read frame trace {path}: {source}")]
    FrameTrace {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed frame trace line {line_number}: {line}")]
    MalformedFrameLine { line_number: usize, line: String },
}

pub type Result<T> = std::result::Result<T, CliError>;
