//! Domain records for the social graph.
//!
//! All rows are owned by the repository. The core reads users and writes
//! new relationship rows; nothing is ever updated in place. Accounts are
//! created only by provisioning, outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account, keyed by a unique email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub email:      String,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

/// A mutual friendship between two accounts.
///
/// The pair is unordered: one row covers both directions, and stores keep
/// at most one row per unordered pair, with `user_a != user_b`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
  pub user_a:      Uuid,
  pub user_b:      Uuid,
  pub recorded_at: DateTime<Utc>,
}

/// A directed block: `requestor_id` has blocked `target_id`.
///
/// The record is directional and both directions may exist independently,
/// but relationship gating treats a block in either direction the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
  pub requestor_id: Uuid,
  pub target_id:    Uuid,
  pub recorded_at:  DateTime<Utc>,
}

/// A directed subscription: `requestor_id` receives `target_id`'s
/// broadcasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
  pub requestor_id: Uuid,
  pub target_id:    Uuid,
  pub recorded_at:  DateTime<Utc>,
}
