//! [`SqliteStore`] — the SQLite implementation of [`RelationshipStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  model::{Block, Friendship, User},
  store::RelationshipStore,
};

use crate::{
  Error, Result,
  encode::{
    RawBlock, RawFriendship, RawUser, canonical_pair, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster social-graph store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Provision an account.
  ///
  /// Not part of the [`RelationshipStore`] contract — the resolver reads
  /// accounts, it never creates them. Used by the server's `add-user`
  /// helper and by tests.
  pub async fn add_user(&self, email: &str, name: &str) -> Result<User> {
    let user = User {
      user_id:    Uuid::new_v4(),
      email:      email.to_owned(),
      name:       name.to_owned(),
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(user.user_id);
    let at_str = encode_dt(user.created_at);
    let email_arg = user.email.clone();
    let name_arg = user.name.clone();

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT OR IGNORE INTO users (user_id, email, name, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, email_arg, name_arg, at_str],
        )?;
        Ok(changed == 1)
      })
      .await?;

    if !inserted {
      return Err(Error::EmailTaken(user.email));
    }
    Ok(user)
  }
}

// ─── RelationshipStore impl ──────────────────────────────────────────────────

impl RelationshipStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn user_id_by_email(&self, email: &str) -> Result<Option<Uuid>> {
    let email = email.to_owned();

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id FROM users WHERE email = ?1",
              rusqlite::params![email],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .map(|s| Uuid::parse_str(&s))
      .transpose()
      .map_err(Error::Uuid)
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT user_id, email, name, created_at FROM users")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawUser {
              user_id:    row.get(0)?,
              email:      row.get(1)?,
              name:       row.get(2)?,
              created_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn emails_by_ids(&self, ids: &[Uuid]) -> Result<Vec<String>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let emails: Vec<String> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; id_strs.len()].join(", ");
        let sql =
          format!("SELECT email FROM users WHERE user_id IN ({placeholders})");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(id_strs.iter()), |row| {
            row.get(0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(emails)
  }

  // ── Relationship rows ─────────────────────────────────────────────────────

  async fn friendships_for(&self, user_id: Uuid) -> Result<Vec<Friendship>> {
    let id_str = encode_uuid(user_id);

    let raws: Vec<RawFriendship> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT user_a, user_b, recorded_at FROM friendships
           WHERE user_a = ?1 OR user_b = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawFriendship {
              user_a:      row.get(0)?,
              user_b:      row.get(1)?,
              recorded_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFriendship::into_friendship).collect()
  }

  async fn blocks_for(&self, user_id: Uuid) -> Result<Vec<Block>> {
    let id_str = encode_uuid(user_id);

    let raws: Vec<RawBlock> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT requestor_id, target_id, recorded_at FROM blocks
           WHERE requestor_id = ?1 OR target_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawBlock {
              requestor_id: row.get(0)?,
              target_id:    row.get(1)?,
              recorded_at:  row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBlock::into_block).collect()
  }

  // ── Existence checks ──────────────────────────────────────────────────────

  async fn friendship_exists(&self, a: Uuid, b: Uuid) -> Result<bool> {
    let (first, second) = canonical_pair(a, b);

    let existing: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM friendships WHERE user_a = ?1 AND user_b = ?2",
              rusqlite::params![first, second],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(existing)
  }

  async fn block_exists(&self, a: Uuid, b: Uuid) -> Result<bool> {
    let a_str = encode_uuid(a);
    let b_str = encode_uuid(b);

    let existing: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM blocks
               WHERE (requestor_id = ?1 AND target_id = ?2)
                  OR (requestor_id = ?2 AND target_id = ?1)",
              rusqlite::params![a_str, b_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(existing)
  }

  async fn subscription_exists(
    &self,
    requestor: Uuid,
    target: Uuid,
  ) -> Result<bool> {
    let requestor_str = encode_uuid(requestor);
    let target_str = encode_uuid(target);

    let existing: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM subscriptions
               WHERE requestor_id = ?1 AND target_id = ?2",
              rusqlite::params![requestor_str, target_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(existing)
  }

  // ── Writes ────────────────────────────────────────────────────────────────
  // `INSERT OR IGNORE` + changed-row count: a uniqueness collision (e.g.
  // lost to a concurrent identical request) reports as `false`, never as
  // an error.

  async fn insert_friendship(&self, a: Uuid, b: Uuid) -> Result<bool> {
    let (first, second) = canonical_pair(a, b);
    let at_str = encode_dt(Utc::now());

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT OR IGNORE INTO friendships (user_a, user_b, recorded_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![first, second, at_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }

  async fn insert_subscription(
    &self,
    requestor: Uuid,
    target: Uuid,
  ) -> Result<bool> {
    let requestor_str = encode_uuid(requestor);
    let target_str = encode_uuid(target);
    let at_str = encode_dt(Utc::now());

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT OR IGNORE INTO subscriptions
             (requestor_id, target_id, recorded_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![requestor_str, target_str, at_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }

  async fn insert_block(&self, requestor: Uuid, target: Uuid) -> Result<bool> {
    let requestor_str = encode_uuid(requestor);
    let target_str = encode_uuid(target);
    let at_str = encode_dt(Utc::now());

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT OR IGNORE INTO blocks (requestor_id, target_id, recorded_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![requestor_str, target_str, at_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }

  // ── Broadcast ─────────────────────────────────────────────────────────────

  async fn broadcast_recipients(&self, sender_id: Uuid) -> Result<Vec<User>> {
    let sender_str = encode_uuid(sender_id);

    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT u.user_id, u.email, u.name, u.created_at
           FROM subscriptions s
           JOIN users u ON u.user_id = s.requestor_id
           WHERE s.target_id = ?1
             AND NOT EXISTS (
               SELECT 1 FROM blocks b
               WHERE (b.requestor_id = s.requestor_id
                      AND b.target_id = s.target_id)
                  OR (b.requestor_id = s.target_id
                      AND b.target_id = s.requestor_id)
             )",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![sender_str], |row| {
            Ok(RawUser {
              user_id:    row.get(0)?,
              email:      row.get(1)?,
              name:       row.get(2)?,
              created_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }
}
