//! CSI error types.
//!
//! The core has exactly two failure modes, both carried by [`CsiError`]:
//! a driver that is misconfigured at startup, and a request for a capability
//! the driver never advertised.  The enum derives [`Serialize`]/[`Deserialize`]
//! so a rejection can be returned inside a [`crate::CsiMessage`] envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for CSI capability operations.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum CsiError {
    /// The driver identity or configuration is incomplete or malformed.
    /// Fatal to the construction attempt.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The caller asked for something the driver did not advertise.  The
    /// payload names the rejected identifier.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CsiError {
    /// Create a [`CsiError::Configuration`] from anything that implements
    /// [`std::fmt::Display`].
    pub fn configuration<E: std::fmt::Display>(e: E) -> Self {
        Self::Configuration(e.to_string())
    }

    /// Create a [`CsiError::InvalidArgument`] from anything that implements
    /// [`std::fmt::Display`].
    pub fn invalid_argument<E: std::fmt::Display>(e: E) -> Self {
        Self::InvalidArgument(e.to_string())
    }

    /// Whether the error must be surfaced to the RPC caller as a client-side
    /// rejection.  Such errors are never retried internally.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
