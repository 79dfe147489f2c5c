//! Error types for schedule wire-format parsing and structured config
//! loading, mirroring `knhk-config`'s `ConfigError` shape (file I/O and
//! parse errors carried as owned strings, one variant per failure mode).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WireError {
    #[error("expected a window duration or the terminating 0, found end of input")]
    UnexpectedEof,

    #[error("token {token_index} (\"{token}\") is not a valid integer: {source}")]
    NotAnInteger {
        token_index: usize,
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("gate value at token {token_index} must be 0 or 1, got {value}")]
    InvalidGateValue { token_index: usize, value: i64 },

    #[error("schedule must contain at least one window")]
    EmptySchedule,

    #[error(transparent)]
    Schedule(#[from] tas_core::ScheduleError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("config references no schedule (neither `schedule` nor `schedule_path` set)")]
    MissingSchedule,

    #[error(transparent)]
    Wire(#[from] WireError),
}
