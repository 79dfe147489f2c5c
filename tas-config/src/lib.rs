//! Configuration surface for the Time-Aware Shaper core: the textual
//! schedule wire codec plus a structured TOML file format built on top of
//! it.

pub mod error;
pub mod file;
pub mod wire;

pub use error::{ConfigError, WireError};
pub use file::CoreConfigFile;
pub use wire::{parse, serialize};
