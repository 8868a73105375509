//! Error types for arm command building and dispatch
//!
//! Three separate enums so callers can branch on recoverability:
//! validation failures happen before any transport interaction and are
//! always safe to retry with fixed input, init failures are fatal at
//! setup, and transport failures apply to a single publish.

use thiserror::Error;

/// Request validation failures, surfaced by the command builder.
///
/// None of these involve the transport; no partial transmission is
/// possible when one is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("expected {expected} joint angles, got {actual}")]
    WrongJointCount { expected: usize, actual: usize },

    #[error("joint angle {index} is not a finite number ({value})")]
    NonFiniteAngle { index: usize, value: f64 },

    #[error("duration must be finite and positive, got {0}")]
    InvalidDuration(f64),
}

/// Fatal setup failures: no command can be sent without a bound channel.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid transport endpoint '{endpoint}': {reason}")]
    Endpoint { endpoint: String, reason: String },

    #[error("failed to open transport session: {0}")]
    SessionOpen(String),

    #[error("failed to bind publisher to topic '{topic}': {reason}")]
    PublisherBind { topic: String, reason: String },
}

/// Transport-level failure of a single publish call.
///
/// The publisher never retries; a caller that wants redelivery repeats
/// the whole build + publish sequence.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to send command: {0}")]
    SendFailed(String),
}
