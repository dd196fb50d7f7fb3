//! Error taxonomy for frame validation, integrity, replay, and resource failures.

use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Why a decrypt call was rejected, or why the engine could not accept a frame.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Frame is shorter than the fixed 53-byte overhead.
    #[error("frame too short to contain a header, udid and mac")]
    NoData,
    /// The 4-byte magic did not match the expected header.
    #[error("frame header magic mismatch")]
    BadHeader,
    /// The frame's per-frame UDID was already accepted in the current slot.
    #[error("frame udid already present in the replay cache")]
    Duplicate,
    /// MAC verification or PKCS#7 unpadding failed.
    #[error("mac verification failed")]
    BadMac,
    /// The replay cache could not grow to accept a new entry.
    #[error("replay cache is full")]
    Full,
}
