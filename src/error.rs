//! Error types for loading, scraping and parsing

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the request file or the tense schema. These abort a quiz
/// run before any question is asked.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown tense \"{id}\" (known tenses: all, {known})")]
    UnknownTense { id: String, known: String },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0:?} is empty; the first line must list the tenses to study")]
    MissingTenseLine(PathBuf),

    #[error("{0:?} lists no verbs; add one infinitive per line after the tense line")]
    NoVerbs(PathBuf),

    #[error("Failed to parse tense schema YAML: {0}")]
    SchemaYaml(#[from] serde_yaml::Error),

    #[error("Invalid tense schema: {0}")]
    Schema(String),
}

/// Failures of the fetch capability. No retry is attempted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Network error fetching \"{verb}\": {source}")]
    Network {
        verb: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No conjugation page found for \"{verb}\"")]
    NotFound { verb: String },

    #[error("Unexpected HTTP status {status} fetching \"{verb}\"")]
    Status { verb: String, status: u16 },
}

/// Unexpected shape inside a conjugation page. Recovered locally by skipping
/// the offending group or tense block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("mood group has no <h4> heading")]
    MissingGroupHeading,

    #[error("tense block in group \"{group}\" has no <th> heading")]
    MissingTenseHeading { group: String },
}

/// Top-level error of a quiz run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize dataset: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
