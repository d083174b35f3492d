//! The `RelationshipStore` trait — the repository contract the resolver
//! consumes.
//!
//! The trait is implemented by storage backends (e.g.
//! `roster-store-sqlite`). The resolver depends on this abstraction, not
//! on any concrete backend, so SQL, in-memory, and mock stores are
//! interchangeable.

use std::future::Future;

use uuid::Uuid;

use crate::model::{Block, Friendship, User};

/// Abstraction over a social-graph repository.
///
/// Every read is point-in-time; no method holds state across calls. The
/// `insert_*` methods report an already-present row as `Ok(false)` rather
/// than an error, so a uniqueness collision lost to a concurrent writer is
/// distinguishable from a storage failure.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RelationshipStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Resolve an email address to its account ID. `None` if no account has
  /// this email.
  fn user_id_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Uuid>, Self::Error>> + Send + 'a;

  /// All accounts, in repository enumeration order.
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Emails for the given account IDs, in repository enumeration order
  /// (not the order of `ids`). Unknown IDs are skipped.
  fn emails_by_ids<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + 'a;

  // ── Relationship rows ─────────────────────────────────────────────────

  /// Friendship rows mentioning `user_id` on either side.
  fn friendships_for(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Friendship>, Self::Error>> + Send + '_;

  /// Block rows mentioning `user_id` in either role.
  fn blocks_for(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Block>, Self::Error>> + Send + '_;

  // ── Existence checks ──────────────────────────────────────────────────

  /// Whether a friendship row exists for the unordered pair.
  fn friendship_exists(
    &self,
    a: Uuid,
    b: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Whether a block row exists between the pair, in either direction.
  fn block_exists(
    &self,
    a: Uuid,
    b: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Whether the ordered subscription row exists.
  fn subscription_exists(
    &self,
    requestor: Uuid,
    target: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a friendship row. `Ok(false)` if the unordered pair already
  /// has one.
  fn insert_friendship(
    &self,
    a: Uuid,
    b: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Insert a subscription row. `Ok(false)` if the ordered pair already
  /// has one.
  fn insert_subscription(
    &self,
    requestor: Uuid,
    target: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Insert a block row. `Ok(false)` if the ordered pair already has one.
  fn insert_block(
    &self,
    requestor: Uuid,
    target: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Broadcast ─────────────────────────────────────────────────────────

  /// Accounts eligible to receive `sender_id`'s broadcasts: subscribed to
  /// the sender, with no block between the pair in either direction. The
  /// filtering join is the store's responsibility; callers do not re-check
  /// blocking.
  fn broadcast_recipients(
    &self,
    sender_id: Uuid,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;
}
