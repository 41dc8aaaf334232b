#![forbid(unsafe_code)]
//! psynet-core library.
//!
//! Value types, error codes, configuration and the correlation engine shared
//! by the psynet network crates.
//!
//! # Conventions
//!
//! - **Errors**: numeric operations return [`Result`] with a typed
//!   [`NetworkError`]; configuration loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod correlation;
pub mod error;
pub mod model;
pub mod stats;

pub use error::{BlockKind, ErrorCode, NetworkError, Result};
