//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: effect error (unknown effect, bad dimensions)
//! - 11: I/O error (scene read, trace write)
//! - 12: input error (bad palette, color, pointer or JSON params)
//! - 13: serialization error

use ambient_fx_core::FxError;
use thiserror::Error;

/// Failure of a subcommand. Each variant owns one exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown effect or unusable dimensions.
    #[error("{0}")]
    Effect(FxError),
    /// Scene could not be read or the trace could not be written.
    #[error("{0}")]
    Io(String),
    /// Flags or scene content the effects reject.
    #[error("{0}")]
    Input(String),
    /// Printing JSON to stdout failed.
    #[error("{0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Effect(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl From<FxError> for CliError {
    fn from(e: FxError) -> Self {
        match e {
            FxError::Io(msg) => CliError::Io(msg),
            e @ (FxError::UnknownPalette(_)
            | FxError::InvalidColor(_)
            | FxError::InvalidParam { .. }) => CliError::Input(e.to_string()),
            other => CliError::Effect(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
