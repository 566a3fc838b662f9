//! # Error Types — Checksum Failure Taxonomy
//!
//! Defines the error hierarchy for the Keel protection-information stack.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Precondition violations fail loudly with the context needed to
//!   locate the offending call site (segment count, raw tag byte).
//! - A verification *mismatch* is not an error — the verifier reports it
//!   as a boolean outcome and leaves the escalation policy to the caller.
//! - The underlying digest primitive has an infallible API, so there is
//!   no error variant for primitive failure; a future algorithm with a
//!   fallible backend would add one here.

use thiserror::Error;

/// Error in protection-information computation and dispatch.
#[derive(Error, Debug)]
pub enum CksumError {
    /// A protection-info header carried an algorithm tag this build does
    /// not implement. Raised when decoding a raw tag byte; the typed
    /// record variants can never reach an unimplemented engine.
    #[error("unsupported protection algorithm tag {tag:#04x}")]
    UnsupportedAlgorithm {
        /// The raw tag byte from the record header.
        tag: u8,
    },

    /// The incremental engine was invoked without an output slot for the
    /// advanced context. The chain cannot move forward without a place
    /// to write the new state.
    #[error("chained computation over {segments} segment(s) requires an output context")]
    MissingContext {
        /// Number of buffer segments in the rejected call.
        segments: usize,
    },
}
