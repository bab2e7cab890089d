//! # Errors

use std::thread::ThreadId;
use thiserror::Error;

/// A guarded object was used from a thread other than the one that created it
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("registry accessed from thread {current:?}, but it is owned by thread {owner:?}")]
pub struct ThreadError {
    /// Thread that created the registry
    pub owner: ThreadId,
    /// Thread that made the offending call
    pub current: ThreadId,
}

/// This enumeration is the list of the possible error outcomes for
/// strict channel binding loading
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StateError {
    /// The document does not have the `{typeID, nameID}` shape
    #[error("malformed channel binding: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A field is present but empty, so it cannot name a channel
    #[error("channel binding has an empty {0}")]
    EmptyField(&'static str),
}
