//! Error types for `roster-core`.

use thiserror::Error;

/// The failure taxonomy every resolver operation reports.
///
/// Each variant carries a human-readable description naming the address or
/// rule that triggered it. The transport layer switches on the variant to
/// pick a status code and serialises the description as the response
/// message.
#[derive(Debug, Error)]
pub enum Error {
  /// A referenced email has no corresponding account.
  #[error("not found: {0}")]
  NotFound(String),

  /// The requested relationship already exists, or an existing block
  /// forbids creating it.
  #[error("conflict: {0}")]
  Conflict(String),

  /// The repository failed.
  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  /// Wrap a storage-layer failure.
  pub fn internal(e: impl std::fmt::Display) -> Self {
    Self::Internal(e.to_string())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
