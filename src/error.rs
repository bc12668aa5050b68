//! Error types for chunking operations.

use thiserror::Error;

/// Errors that can occur while configuring or exporting chunk artifacts.
///
/// The chunking operation itself never returns an error: its failures are
/// reported as [`Diagnostics`](crate::Diagnostics) alongside a `None` result.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid glossary pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
