//! Error types for autoclient-compiler
//!
//! Provides unified error handling across the crate. Everything here is
//! fatal: the pass aborts and no output is written. Recoverable problems are
//! reported as [`crate::shared::models::Diagnostic`]s instead.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::validator_synthesis::SynthesisError;

/// Main error type for compile operations
#[derive(Debug, Error)]
pub enum CompileError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source could not be parsed as TypeScript
    #[error("Parse error in {file} at {line}:{column}: unexpected {kind}")]
    Parse {
        file: String,
        line: u32,
        column: u32,
        kind: String,
    },

    /// Unrecognizable type shape reached while compiling a call site
    #[error("{file}:{line}: {source}")]
    Synthesis {
        file: String,
        line: u32,
        #[source]
        source: SynthesisError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Directory walking error
    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Report serialization error
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// Parser could not be initialised
    #[error("Failed to set language: {0}")]
    Language(String),
}

impl CompileError {
    /// Create a parse error
    pub fn parse(file: impl Into<String>, line: u32, column: u32, kind: impl Into<String>) -> Self {
        CompileError::Parse {
            file: file.into(),
            line,
            column,
            kind: kind.into(),
        }
    }

    /// Attach a location to a synthesis failure
    pub fn synthesis(file: impl Into<String>, line: u32, source: SynthesisError) -> Self {
        CompileError::Synthesis {
            file: file.into(),
            line,
            source,
        }
    }
}

/// Result type alias for compile operations
pub type Result<T> = std::result::Result<T, CompileError>;
