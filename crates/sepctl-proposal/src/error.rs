//! Error taxonomy for proposal operations.
//!
//! Scan-level operations degrade gracefully (a bad file is skipped, never
//! fatal); single-document operations fail loudly with the offending path or
//! number in the message.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors produced by proposal parsing, lookup, and mutation.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// No file in the directory carries the requested number.
    #[error("SEP not found: {number}")]
    NotFound { number: String },

    /// The two frontmatter delimiters could not be located during a rewrite.
    #[error("invalid frontmatter format: {path}")]
    MalformedDocument { path: Utf8PathBuf },

    /// Status value outside the fixed enumeration. Rejected before any I/O.
    #[error("invalid status: {value} (valid: DRAFT, ACCEPTED, BLOCKED, CANCELLED, DONE)")]
    InvalidStatus { value: String },

    /// The frontmatter block is not well-formed YAML.
    #[error("failed to parse frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    /// File or directory could not be read or written.
    #[error("{path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProposalError {
    pub(crate) fn io(path: &Utf8Path, source: io::Error) -> Self {
        ProposalError::Io {
            path: path.to_owned(),
            source,
        }
    }
}
