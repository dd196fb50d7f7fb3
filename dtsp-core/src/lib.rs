//! Data Transfer Security Protocol (DTSP) frame engine.
//!
//! Turns arbitrary payloads into self-contained, time-rotated encrypted
//! frames with built-in replay protection. See [`Engine`] for the main
//! entry point.
#![forbid(unsafe_code)]

pub mod aes_cbc;
pub mod clock;
pub mod config;
pub mod crc32;
mod engine;
pub mod error;
mod isaac;
pub mod md5;
pub mod replay;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, DtspConfig};
pub use engine::{Engine, HEADER, INTERVAL, PADDING};
pub use error::{Error, Result};
pub use replay::{Insertion, ReplayCache};
