//! Error types shared across the crate.
//!
//! Startup errors ([`VocabularyError`]) are fatal. Asset errors are caught per
//! entry by the provisioner. Interaction errors only ever reach the log.

use std::path::PathBuf;

use crate::{host::NodeId, vocabulary::LabelState};

/// The vocabulary table could not be loaded. Nothing downstream runs.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("could not read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed vocabulary data at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("vocabulary entry '{id}' is invalid: {field} {reason}")]
    Invalid {
        id: String,
        field: &'static str,
        reason: String,
    },
}

impl From<serde_json::Error> for VocabularyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}

/// Loading a single model or sound failed.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse model {resource}: {message}")]
    Model { resource: String, message: String },

    #[error("model {0} contains no instantiable template")]
    NoTemplate(String),

    #[error("sound '{name}' could not be registered: {reason}")]
    Sound { name: String, reason: String },
}

/// The host rejected a scene operation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HostError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {0} has no text to update")]
    NotText(NodeId),

    #[error("mesh '{0}' does not exist")]
    UnknownMesh(String),

    #[error("sound '{0}' is not registered")]
    UnknownSound(String),

    #[error("sound '{name}' cannot be played from {uri}")]
    Unplayable { name: String, uri: String },
}

/// A click could not be turned into its effect.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InteractionError {
    #[error("no vocabulary entry with id '{0}'")]
    UnknownEntry(String),

    #[error("no pronunciation sound for '{id}': {reason}")]
    NoSound { id: String, reason: String },

    #[error("label of '{id}' stays {state:?}: {source}")]
    Label {
        id: String,
        state: LabelState,
        #[source]
        source: HostError,
    },

    #[error("playback of '{id}' failed: {source}")]
    Playback {
        id: String,
        #[source]
        source: HostError,
    },
}
