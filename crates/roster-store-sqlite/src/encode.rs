//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings; UUIDs as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use roster_core::model::{Block, Friendship, User};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

/// Order a pair for the friendships table: the lexicographically smaller
/// encoded UUID goes in `user_a`, so one row covers both orientations.
pub fn canonical_pair(a: Uuid, b: Uuid) -> (String, String) {
  let (a, b) = (encode_uuid(a), encode_uuid(b));
  if a <= b { (a, b) } else { (b, a) }
}

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────
// Straight column images; decoding into domain types happens outside the
// connection closure so `rusqlite` row mapping stays infallible.

pub struct RawUser {
  pub user_id:    String,
  pub email:      String,
  pub name:       String,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      email:      self.email,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawFriendship {
  pub user_a:      String,
  pub user_b:      String,
  pub recorded_at: String,
}

impl RawFriendship {
  pub fn into_friendship(self) -> Result<Friendship> {
    Ok(Friendship {
      user_a:      decode_uuid(&self.user_a)?,
      user_b:      decode_uuid(&self.user_b)?,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

pub struct RawBlock {
  pub requestor_id: String,
  pub target_id:    String,
  pub recorded_at:  String,
}

impl RawBlock {
  pub fn into_block(self) -> Result<Block> {
    Ok(Block {
      requestor_id: decode_uuid(&self.requestor_id)?,
      target_id:    decode_uuid(&self.target_id)?,
      recorded_at:  decode_dt(&self.recorded_at)?,
    })
  }
}
