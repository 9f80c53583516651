//! Error types at the collaborator seams.
//!
//! Each external collaborator fails with its own error; the dispatcher maps
//! them to fixed user-facing lines and never leaks the underlying detail.

use thiserror::Error;

/// Article store failure. A clean not-found is not an error; it is
/// expressed in the operation's return value.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
}

/// External parser failure: transport-level or an unusable response body.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Parser request failed: {0}")]
    Http(String),
    #[error("Parser returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Long-form publishing failure.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Publish request failed: {0}")]
    Http(String),
    #[error("Publish rejected: {0}")]
    Api(String),
}

/// Outbound transport failure (send or edit).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Transport error: {0}")]
    Transport(String),
}
