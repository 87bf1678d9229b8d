//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `PedError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `ped-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PedError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `ped-*` crates.
pub type PedResult<T> = Result<T, PedError>;
