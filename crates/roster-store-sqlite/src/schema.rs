//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id     TEXT PRIMARY KEY,
    email       TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

-- One row per unordered pair; user_a holds the smaller encoded UUID, so
-- the UNIQUE constraint covers both orientations.
CREATE TABLE IF NOT EXISTS friendships (
    user_a      TEXT NOT NULL REFERENCES users(user_id),
    user_b      TEXT NOT NULL REFERENCES users(user_id),
    recorded_at TEXT NOT NULL,
    UNIQUE (user_a, user_b),
    CHECK  (user_a < user_b)
);

-- Directional; both directions may exist independently.
CREATE TABLE IF NOT EXISTS blocks (
    requestor_id TEXT NOT NULL REFERENCES users(user_id),
    target_id    TEXT NOT NULL REFERENCES users(user_id),
    recorded_at  TEXT NOT NULL,
    UNIQUE (requestor_id, target_id),
    CHECK  (requestor_id != target_id)
);

CREATE TABLE IF NOT EXISTS subscriptions (
    requestor_id TEXT NOT NULL REFERENCES users(user_id),
    target_id    TEXT NOT NULL REFERENCES users(user_id),
    recorded_at  TEXT NOT NULL,
    UNIQUE (requestor_id, target_id),
    CHECK  (requestor_id != target_id)
);

CREATE INDEX IF NOT EXISTS friendships_b_idx    ON friendships(user_b);
CREATE INDEX IF NOT EXISTS blocks_target_idx    ON blocks(target_id);
CREATE INDEX IF NOT EXISTS subs_target_idx      ON subscriptions(target_id);

PRAGMA user_version = 1;
";
