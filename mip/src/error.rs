//! Error kinds of the proof protocol.
//!
//! A root mismatch is not an error: it is the normal invalid outcome of a check. The kinds
//! here cover the ways a check can fail to produce an outcome at all, plus rejection of a
//! malformed request before any network activity.

use std::fmt;

/// Errors raised while building or executing a proof request.
///
/// `Connection` and `Protocol` are caught per transaction and recorded in the report's error
/// bucket; they never abort the run. `InvalidConfiguration` is raised eagerly by
/// [`crate::ProofRequestBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The authority was unreachable, or the connection dropped or timed out mid-exchange.
    Connection(String),
    /// The response stream ended without the sentinel or contained a malformed digest line.
    Protocol(String),
    /// The proof request was malformed.
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Connection(reason) => write!(f, "connection error: {}", reason),
            Error::Protocol(reason) => write!(f, "protocol violation: {}", reason),
            Error::InvalidConfiguration(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
