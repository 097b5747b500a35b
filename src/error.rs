//! Error types for schema loading and Go code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a schema model or emitting Go sources.
///
/// Every variant aborts the current run; nothing is retried.
#[derive(Debug, Error)]
pub enum GenError {
    /// A column type matched neither the builtin table nor a registered enum.
    #[error("type '{type_name}' is not supported (table '{table}', column '{column}')")]
    UnsupportedType {
        table: String,
        column: String,
        type_name: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no schema loaded, call Generator::load first")]
    NoSchema,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
