//! The relationship resolver — business rules over a
//! [`RelationshipStore`].
//!
//! Each operation is a single resolve → rule-check → persist pipeline over
//! fresh reads; the resolver holds no state between calls. Inputs are
//! email addresses, already syntax-checked by the transport layer; outputs
//! are plain email lists or a typed [`Error`].

use std::collections::HashSet;

use uuid::Uuid;

use crate::{Error, Result, store::RelationshipStore};

/// Implements the friend-management operations over any store.
pub struct Resolver<S> {
  store: S,
}

impl<S> Resolver<S>
where
  S: RelationshipStore,
{
  pub fn new(store: S) -> Self { Self { store } }

  // ── Operations ────────────────────────────────────────────────────────

  /// All account emails, in repository enumeration order.
  pub async fn list_all_users(&self) -> Result<Vec<String>> {
    let users = self.store.list_users().await.map_err(Error::internal)?;
    Ok(users.into_iter().map(|u| u.email).collect())
  }

  /// Create a friendship between two accounts.
  ///
  /// Fails with [`Error::Conflict`] if the pair is already friends or a
  /// block exists between them in either direction.
  pub async fn create_friendship(
    &self,
    user_email: &str,
    friend_email: &str,
  ) -> Result<()> {
    let user_id = self.resolve_email(user_email).await?;
    let friend_id = self.resolve_email(friend_email).await?;

    let existing = self
      .store
      .friendship_exists(user_id, friend_id)
      .await
      .map_err(Error::internal)?;
    if existing {
      return Err(already_friends(user_email, friend_email));
    }

    if self.blocked(user_id, friend_id).await? {
      return Err(blocked_pair(user_email, friend_email));
    }

    // A concurrent identical request may win the insert between the check
    // above and here; the store reports that collision as `false` and it
    // surfaces as the same conflict.
    let inserted = self
      .store
      .insert_friendship(user_id, friend_id)
      .await
      .map_err(Error::internal)?;
    if !inserted {
      return Err(already_friends(user_email, friend_email));
    }

    Ok(())
  }

  /// Emails of the user's friends, excluding anyone who shares a block
  /// with the user in either direction.
  pub async fn list_friends(&self, user_email: &str) -> Result<Vec<String>> {
    let user_id = self.resolve_email(user_email).await?;
    self.unblocked_friend_emails(user_id).await
  }

  /// Emails present in both users' blocking-filtered friend lists, in the
  /// order encountered while scanning the second user's list.
  ///
  /// Blocking is applied per account — each list is filtered by that
  /// account's own block rows only. An empty intersection is an empty
  /// list, not an error.
  pub async fn list_common_friends(
    &self,
    first_email: &str,
    second_email: &str,
  ) -> Result<Vec<String>> {
    let first_id = self.resolve_email(first_email).await?;
    let second_id = self.resolve_email(second_email).await?;

    let first_friends = self.unblocked_friend_emails(first_id).await?;
    let second_friends = self.unblocked_friend_emails(second_id).await?;

    let first_set: HashSet<&str> =
      first_friends.iter().map(String::as_str).collect();

    Ok(
      second_friends
        .into_iter()
        .filter(|email| first_set.contains(email.as_str()))
        .collect(),
    )
  }

  /// Subscribe `requestor_email` to `target_email`'s broadcasts.
  pub async fn create_subscription(
    &self,
    requestor_email: &str,
    target_email: &str,
  ) -> Result<()> {
    let requestor_id = self.resolve_email(requestor_email).await?;
    let target_id = self.resolve_email(target_email).await?;

    let existing = self
      .store
      .subscription_exists(requestor_id, target_id)
      .await
      .map_err(Error::internal)?;
    if existing {
      return Err(already_subscribed(requestor_email, target_email));
    }

    if self.blocked(requestor_id, target_id).await? {
      return Err(blocked_pair(requestor_email, target_email));
    }

    let inserted = self
      .store
      .insert_subscription(requestor_id, target_id)
      .await
      .map_err(Error::internal)?;
    if !inserted {
      return Err(already_subscribed(requestor_email, target_email));
    }

    Ok(())
  }

  /// Block `target_email` on behalf of `requestor_email`.
  ///
  /// Existing friendships and subscriptions are left in storage; derived
  /// views (friend lists, broadcast recipients) filter them out instead.
  pub async fn create_block(
    &self,
    requestor_email: &str,
    target_email: &str,
  ) -> Result<()> {
    let requestor_id = self.resolve_email(requestor_email).await?;
    let target_id = self.resolve_email(target_email).await?;

    // Idempotence guard is direction-agnostic: a block already on file
    // either way conflicts.
    if self.blocked(requestor_id, target_id).await? {
      return Err(blocked_pair(requestor_email, target_email));
    }

    let inserted = self
      .store
      .insert_block(requestor_id, target_id)
      .await
      .map_err(Error::internal)?;
    if !inserted {
      return Err(blocked_pair(requestor_email, target_email));
    }

    Ok(())
  }

  /// Emails that should receive `sender_email`'s broadcast of `text`.
  ///
  /// The store's eligible recipients come first, in their returned order;
  /// then every address mentioned in `text` that is not already present,
  /// in first-appearance order. Exact string match, each entry unique.
  pub async fn list_broadcast_recipients(
    &self,
    sender_email: &str,
    text: &str,
  ) -> Result<Vec<String>> {
    let sender_id = self.resolve_email(sender_email).await?;

    let recipients = self
      .store
      .broadcast_recipients(sender_id)
      .await
      .map_err(Error::internal)?;

    let mut result = Vec::with_capacity(recipients.len());
    let mut seen: HashSet<String> = HashSet::with_capacity(recipients.len());
    for user in recipients {
      seen.insert(user.email.clone());
      result.push(user.email);
    }

    for mention in roster_mention::mentions(text) {
      if !seen.contains(mention) {
        seen.insert(mention.to_owned());
        result.push(mention.to_owned());
      }
    }

    Ok(result)
  }

  // ── Shared rules ──────────────────────────────────────────────────────

  /// Resolve an email to its account ID, or fail with [`Error::NotFound`]
  /// naming the address.
  async fn resolve_email(&self, email: &str) -> Result<Uuid> {
    self
      .store
      .user_id_by_email(email)
      .await
      .map_err(Error::internal)?
      .ok_or_else(|| Error::NotFound(format!("{email} does not exist")))
  }

  /// The blocking predicate shared by the relationship-forming
  /// operations: a block between the pair, in either direction.
  async fn blocked(&self, a: Uuid, b: Uuid) -> Result<bool> {
    self.store.block_exists(a, b).await.map_err(Error::internal)
  }

  /// The user's friend emails with blocked pairs removed: IDs co-occurring
  /// with the user in friendship rows, minus IDs co-occurring with the
  /// user in block rows (either role), resolved to emails in repository
  /// order.
  async fn unblocked_friend_emails(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<String>> {
    let friendships = self
      .store
      .friendships_for(user_id)
      .await
      .map_err(Error::internal)?;

    let mut friend_ids = Vec::with_capacity(friendships.len());
    for friendship in &friendships {
      if friendship.user_a == user_id {
        friend_ids.push(friendship.user_b);
      }
      if friendship.user_b == user_id {
        friend_ids.push(friendship.user_a);
      }
    }

    let blocks =
      self.store.blocks_for(user_id).await.map_err(Error::internal)?;

    let mut blocked_ids: HashSet<Uuid> = HashSet::with_capacity(blocks.len());
    for block in &blocks {
      if block.requestor_id == user_id {
        blocked_ids.insert(block.target_id);
      }
      if block.target_id == user_id {
        blocked_ids.insert(block.requestor_id);
      }
    }

    friend_ids.retain(|id| !blocked_ids.contains(id));

    self
      .store
      .emails_by_ids(&friend_ids)
      .await
      .map_err(Error::internal)
  }
}

// ── Conflict messages ───────────────────────────────────────────────────

fn already_friends(a: &str, b: &str) -> Error {
  Error::Conflict(format!("a friendship already exists between {a} and {b}"))
}

fn already_subscribed(requestor: &str, target: &str) -> Error {
  Error::Conflict(format!("{requestor} is already subscribed to {target}"))
}

fn blocked_pair(a: &str, b: &str) -> Error {
  Error::Conflict(format!("a block exists between {a} and {b}"))
}
