//! Error types for the content and access layers

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the post collection
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Cannot read content directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Cannot read {path:?} in the content directory: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Cannot read post {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("Duplicate slug '{slug}': {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// A fenced front-matter header that does not parse
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the private-post view state machine
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccessError {
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}
