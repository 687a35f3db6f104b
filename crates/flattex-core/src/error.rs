//! Error types for resolution runs.

use std::io;

use thiserror::Error;

/// Errors that abort a resolution run.
///
/// Every variant is fatal: the resolver never recovers, retries, or skips a
/// file, and output already written to the sink stays there. Partial output
/// is the documented failure artifact.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Reading a line from an input stream failed.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// Writing to the output sink failed.
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    /// An included file could not be opened.
    #[error("cannot open included file '{path}': {source}")]
    Open {
        /// Normalized filename of the missing or unreadable file.
        path: String,
        #[source]
        source: io::Error,
    },

    /// The configured maximum inclusion depth was exceeded.
    #[error("inclusion of '{path}' exceeds maximum depth {limit}")]
    TooDeep {
        /// File whose inclusion would have gone too deep.
        path: String,
        /// The configured depth limit.
        limit: usize,
    },

    /// A file includes itself, directly or transitively.
    #[error("cyclic inclusion of '{path}'")]
    Cycle {
        /// File that was already open when its inclusion came around again.
        path: String,
    },
}
