// hmp-terrain/src/error.rs
//! Error types for HMP terrain parsing.
//!
//! Every error is fatal to the decode call that raised it: the parser never
//! returns a partial scene. Callers see either a fully populated
//! [`Scene`](crate::scene::Scene) or exactly one of these variants.

use thiserror::Error;

use crate::hmp::Revision;

/// Errors that can occur while parsing an HMP terrain file
#[derive(Error, Debug)]
pub enum HmpError {
    /// The buffer is too small to contain even a minimal header
    #[error("HMP file is too small: {0}")]
    FileTooSmall(String),

    /// The 4-byte magic word did not match any known HMP revision
    #[error("unknown HMP subformat: magic word ({0}) is not known")]
    UnknownSubformat(String),

    /// The magic word matched a revision this parser does not decode
    #[error("{0} is currently not supported")]
    UnsupportedRevision(Revision),

    /// A header field failed a numeric sanity check
    #[error("invalid HMP header: {0}")]
    InvalidHeader(String),

    /// A read or skip would run past the end of the buffer
    #[error("truncated HMP file: need {needed} bytes at offset {offset}, only {remaining} remain")]
    Truncated {
        /// Cursor position at which the read was attempted
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes left in the buffer
        remaining: usize,
    },

    /// The skin chunk type tag could not be resolved
    #[error("unable to read HMP skin chunk: {0}")]
    UnreadableSkinChunk(String),
}

/// Result type alias for HMP parsing operations
pub type HmpResult<T> = Result<T, HmpError>;
