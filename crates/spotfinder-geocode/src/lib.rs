//! Address-to-coordinates resolution against a Google-Geocoding-compatible
//! endpoint.
//!
//! [`GeocodeClient::resolve`] distinguishes "no match" (`Ok(None)`) from
//! provider trouble (`Err`), so callers can log outages differently from
//! genuinely unknown addresses.

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::GeocodeClient;
pub use error::GeocodeError;
