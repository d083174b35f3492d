//! Integration tests for `SqliteStore` against an in-memory database.

use roster_core::{Error as CoreError, Resolver, store::RelationshipStore};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_user_and_resolve_email() {
  let s = store().await;

  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  assert_eq!(andy.email, "andy@example.com");

  let resolved = s.user_id_by_email("andy@example.com").await.unwrap();
  assert_eq!(resolved, Some(andy.user_id));
}

#[tokio::test]
async fn add_user_duplicate_email_rejected() {
  let s = store().await;

  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let err = s.add_user("andy@example.com", "impostor").await.unwrap_err();
  assert!(matches!(err, Error::EmailTaken(ref e) if e == "andy@example.com"));

  // The original account is untouched.
  let resolved = s.user_id_by_email("andy@example.com").await.unwrap();
  assert_eq!(resolved, Some(andy.user_id));
}

#[tokio::test]
async fn user_id_by_email_missing_returns_none() {
  let s = store().await;
  let resolved = s.user_id_by_email("ghost@example.com").await.unwrap();
  assert!(resolved.is_none());
}

#[tokio::test]
async fn list_users_in_insertion_order() {
  let s = store().await;
  s.add_user("john@example.com", "john").await.unwrap();
  s.add_user("andy@example.com", "andy").await.unwrap();
  s.add_user("kate@example.com", "kate").await.unwrap();

  let users = s.list_users().await.unwrap();
  let emails: Vec<_> = users.into_iter().map(|u| u.email).collect();
  assert_eq!(
    emails,
    ["john@example.com", "andy@example.com", "kate@example.com"]
  );
}

#[tokio::test]
async fn emails_by_ids_returns_table_order() {
  let s = store().await;
  let john = s.add_user("john@example.com", "john").await.unwrap();
  s.add_user("andy@example.com", "andy").await.unwrap();
  let kate = s.add_user("kate@example.com", "kate").await.unwrap();

  // Query order does not leak into the result; the users table wins.
  let emails = s.emails_by_ids(&[kate.user_id, john.user_id]).await.unwrap();
  assert_eq!(emails, ["john@example.com", "kate@example.com"]);
}

#[tokio::test]
async fn emails_by_ids_empty_and_unknown() {
  let s = store().await;
  s.add_user("andy@example.com", "andy").await.unwrap();

  assert!(s.emails_by_ids(&[]).await.unwrap().is_empty());
  assert!(s.emails_by_ids(&[Uuid::new_v4()]).await.unwrap().is_empty());
}

// ─── Friendships ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_friendship_reports_duplicates_in_both_orders() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let john = s.add_user("john@example.com", "john").await.unwrap();

  assert!(s.insert_friendship(andy.user_id, john.user_id).await.unwrap());
  assert!(!s.insert_friendship(andy.user_id, john.user_id).await.unwrap());
  // Canonical pair storage makes the swapped insert the same row.
  assert!(!s.insert_friendship(john.user_id, andy.user_id).await.unwrap());
}

#[tokio::test]
async fn friendship_exists_either_order() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let john = s.add_user("john@example.com", "john").await.unwrap();

  assert!(!s.friendship_exists(andy.user_id, john.user_id).await.unwrap());
  s.insert_friendship(andy.user_id, john.user_id).await.unwrap();

  assert!(s.friendship_exists(andy.user_id, john.user_id).await.unwrap());
  assert!(s.friendship_exists(john.user_id, andy.user_id).await.unwrap());
}

#[tokio::test]
async fn friendships_for_finds_the_user_on_either_side() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let john = s.add_user("john@example.com", "john").await.unwrap();
  let kate = s.add_user("kate@example.com", "kate").await.unwrap();

  s.insert_friendship(andy.user_id, john.user_id).await.unwrap();
  s.insert_friendship(kate.user_id, andy.user_id).await.unwrap();
  s.insert_friendship(john.user_id, kate.user_id).await.unwrap();

  let rows = s.friendships_for(andy.user_id).await.unwrap();
  assert_eq!(rows.len(), 2);
  assert!(
    rows
      .iter()
      .all(|f| f.user_a == andy.user_id || f.user_b == andy.user_id)
  );
}

// ─── Blocks ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn block_exists_is_direction_agnostic() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let lisa = s.add_user("lisa@example.com", "lisa").await.unwrap();

  s.insert_block(andy.user_id, lisa.user_id).await.unwrap();

  assert!(s.block_exists(andy.user_id, lisa.user_id).await.unwrap());
  assert!(s.block_exists(lisa.user_id, andy.user_id).await.unwrap());
}

#[tokio::test]
async fn block_rows_are_directional_in_storage() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let lisa = s.add_user("lisa@example.com", "lisa").await.unwrap();

  // The reverse-direction row is distinct at the storage level; the
  // direction-agnostic guard lives in the resolver.
  assert!(s.insert_block(andy.user_id, lisa.user_id).await.unwrap());
  assert!(s.insert_block(lisa.user_id, andy.user_id).await.unwrap());
  assert!(!s.insert_block(andy.user_id, lisa.user_id).await.unwrap());

  let rows = s.blocks_for(andy.user_id).await.unwrap();
  assert_eq!(rows.len(), 2);
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn subscription_rows_are_ordered_pairs() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let john = s.add_user("john@example.com", "john").await.unwrap();

  assert!(s.insert_subscription(andy.user_id, john.user_id).await.unwrap());
  assert!(!s.insert_subscription(andy.user_id, john.user_id).await.unwrap());
  // The reverse direction is a distinct relation.
  assert!(s.insert_subscription(john.user_id, andy.user_id).await.unwrap());

  assert!(
    s.subscription_exists(andy.user_id, john.user_id).await.unwrap()
  );
  assert!(
    s.subscription_exists(john.user_id, andy.user_id).await.unwrap()
  );
}

// ─── Broadcast join ──────────────────────────────────────────────────────────

#[tokio::test]
async fn broadcast_recipients_joins_subscriptions_against_blocks() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let john = s.add_user("john@example.com", "john").await.unwrap();
  let lisa = s.add_user("lisa@example.com", "lisa").await.unwrap();
  let kate = s.add_user("kate@example.com", "kate").await.unwrap();

  s.insert_subscription(john.user_id, andy.user_id).await.unwrap();
  s.insert_subscription(lisa.user_id, andy.user_id).await.unwrap();
  // kate is a friend but not a subscriber; friendship does not qualify.
  s.insert_friendship(kate.user_id, andy.user_id).await.unwrap();
  // lisa blocked andy after subscribing.
  s.insert_block(lisa.user_id, andy.user_id).await.unwrap();

  let recipients = s.broadcast_recipients(andy.user_id).await.unwrap();
  let emails: Vec<_> = recipients.into_iter().map(|u| u.email).collect();
  assert_eq!(emails, ["john@example.com"]);
}

#[tokio::test]
async fn broadcast_recipients_excludes_blocks_in_the_other_direction() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let john = s.add_user("john@example.com", "john").await.unwrap();

  s.insert_subscription(john.user_id, andy.user_id).await.unwrap();
  // The sender blocked the subscriber.
  s.insert_block(andy.user_id, john.user_id).await.unwrap();

  let recipients = s.broadcast_recipients(andy.user_id).await.unwrap();
  assert!(recipients.is_empty());
}

#[tokio::test]
async fn broadcast_recipients_none_without_subscribers() {
  let s = store().await;
  let andy = s.add_user("andy@example.com", "andy").await.unwrap();
  let recipients = s.broadcast_recipients(andy.user_id).await.unwrap();
  assert!(recipients.is_empty());
}

// ─── Resolver over SqliteStore, end to end ───────────────────────────────────

#[tokio::test]
async fn friendship_scenario_create_then_repeat() {
  let s = store().await;
  s.add_user("john@example.com", "john").await.unwrap();
  s.add_user("andy@example.com", "andy").await.unwrap();

  let resolver = Resolver::new(s);
  resolver
    .create_friendship("andy@example.com", "john@example.com")
    .await
    .unwrap();

  let err = resolver
    .create_friendship("andy@example.com", "john@example.com")
    .await
    .unwrap_err();
  assert!(
    matches!(err, CoreError::Conflict(ref m) if m.contains("friendship"))
  );
}

#[tokio::test]
async fn subscription_scenario_blocked_both_directions() {
  let s = store().await;
  s.add_user("andy@example.com", "andy").await.unwrap();
  s.add_user("lisa@example.com", "lisa").await.unwrap();

  let resolver = Resolver::new(s);
  resolver
    .create_block("andy@example.com", "lisa@example.com")
    .await
    .unwrap();

  let err = resolver
    .create_subscription("andy@example.com", "lisa@example.com")
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(_)));

  let err = resolver
    .create_subscription("lisa@example.com", "andy@example.com")
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Conflict(_)));
}

#[tokio::test]
async fn broadcast_scenario_subscriber_plus_mention() {
  let s = store().await;
  s.add_user("andy@example.com", "andy").await.unwrap();
  s.add_user("john@example.com", "john").await.unwrap();
  s.add_user("kate@example.com", "kate").await.unwrap();

  let resolver = Resolver::new(s);
  resolver
    .create_subscription("john@example.com", "andy@example.com")
    .await
    .unwrap();

  let recipients = resolver
    .list_broadcast_recipients("andy@example.com", "Hello kate@example.com")
    .await
    .unwrap();
  assert_eq!(recipients, ["john@example.com", "kate@example.com"]);
}

#[tokio::test]
async fn blocked_friend_disappears_from_both_friend_lists() {
  let s = store().await;
  s.add_user("andy@example.com", "andy").await.unwrap();
  s.add_user("john@example.com", "john").await.unwrap();

  let resolver = Resolver::new(s);
  resolver
    .create_friendship("andy@example.com", "john@example.com")
    .await
    .unwrap();
  resolver
    .create_block("john@example.com", "andy@example.com")
    .await
    .unwrap();

  assert!(
    resolver.list_friends("andy@example.com").await.unwrap().is_empty()
  );
  assert!(
    resolver.list_friends("john@example.com").await.unwrap().is_empty()
  );
}

#[tokio::test]
async fn common_friends_order_follows_second_argument() {
  let s = store().await;
  s.add_user("andy@example.com", "andy").await.unwrap();
  s.add_user("john@example.com", "john").await.unwrap();
  s.add_user("kate@example.com", "kate").await.unwrap();
  s.add_user("lisa@example.com", "lisa").await.unwrap();

  let resolver = Resolver::new(s);
  for friend in ["kate@example.com", "lisa@example.com"] {
    resolver.create_friendship("andy@example.com", friend).await.unwrap();
    resolver.create_friendship("john@example.com", friend).await.unwrap();
  }

  let ab = resolver
    .list_common_friends("andy@example.com", "john@example.com")
    .await
    .unwrap();
  let ba = resolver
    .list_common_friends("john@example.com", "andy@example.com")
    .await
    .unwrap();

  // Same set either way; the scan order comes from the second argument's
  // filtered list, which here is users-table order for both.
  assert_eq!(ab, ["kate@example.com", "lisa@example.com"]);
  assert_eq!(ab, ba);
}
