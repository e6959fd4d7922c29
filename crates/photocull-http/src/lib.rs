#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// HttpPersistence is generic over a crate-private backend; consumers use it
// through PersistencePort, not its internal generic structure.
#![allow(private_bounds, private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultHttpPersistence, HttpPersistence};

// Configuration
pub use config::HttpClientConfig;

// Construction errors
pub use error::HttpError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
