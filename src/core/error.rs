//! Contract errors raised at the kernel boundary.
//!
//! These are fatal for the call that produced them: a caller handed the
//! kernel something it cannot interpret, and the kernel refuses to guess.
//! Ordinary validation failures are not errors; they surface as skipped
//! effects in the execution report.

use thiserror::Error;

/// Fatal boundary errors.
#[derive(Debug, Error)]
pub enum KernelError {
    /// A target selector string did not match `player`, `enemy`, or `companion:<id>`.
    #[error("invalid target selector: {0:?}")]
    InvalidTarget(String),

    /// An effect named a type outside the closed instruction set.
    #[error("unknown effect type: {0:?}")]
    UnknownEffectType(String),

    /// An effect object had no `type` tag.
    #[error("effect at index {0} has no type tag")]
    MissingEffectType(usize),

    /// A decision did not match either accepted decision shape.
    #[error("malformed decision: {0}")]
    MalformedDecision(String),

    /// JSON decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot encoding or decoding failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}
