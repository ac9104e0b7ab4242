//! @ai:module:intent Error types for the regeneration pipeline
//! @ai:module:layer domain
//! @ai:module:public_api RegenError, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for locating, running and aggregating benchmarks
#[derive(Error, Debug)]
pub enum RegenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed ({}): {command}\n{diagnostics}", exit_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        diagnostics: String,
    },

    #[error("Generator {generator} produced neither {expected} nor any standard output")]
    MissingOutput { generator: PathBuf, expected: PathBuf },

    #[error("Regenerated results differ from the committed ones:\n{0}")]
    Drift(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Git(#[from] rules_gitlink::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RegenError>;
