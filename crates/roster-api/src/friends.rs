//! Handlers for `/friends` endpoints.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/friends` | `{"friends":["andy@example.com","john@example.com"]}` |
//! | `POST` | `/friends/list` | `{"email":"andy@example.com"}` |
//! | `POST` | `/friends/common` | `{"friends":[a, b]}` |

use std::sync::Arc;

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use roster_core::{Resolver, store::RelationshipStore};
use serde::{Deserialize, Serialize};

use crate::{StatusResponse, error::ApiError, validate};

#[derive(Debug, Deserialize)]
pub struct FriendPairBody {
  #[serde(default)]
  pub friends: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FriendListBody {
  #[serde(default)]
  pub email: String,
}

#[derive(Debug, Serialize)]
pub struct FriendListResponse {
  pub success: bool,
  pub friends: Vec<String>,
  pub count:   usize,
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /friends` — create a friendship between the two listed addresses.
pub async fn create<S>(
  State(resolver): State<Arc<Resolver<S>>>,
  Json(body): Json<FriendPairBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RelationshipStore + 'static,
{
  let (user, friend) = validate::email_pair(&body.friends)?;
  resolver.create_friendship(user, friend).await?;
  Ok((StatusCode::CREATED, Json(StatusResponse { success: true })))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `POST /friends/list` — the user's friends, blocking-filtered.
pub async fn list<S>(
  State(resolver): State<Arc<Resolver<S>>>,
  Json(body): Json<FriendListBody>,
) -> Result<Json<FriendListResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  validate::email("email", &body.email)?;
  let friends = resolver.list_friends(&body.email).await?;
  Ok(Json(FriendListResponse {
    success: true,
    count:   friends.len(),
    friends,
  }))
}

// ─── Common ───────────────────────────────────────────────────────────────────

/// `POST /friends/common` — friends the two listed addresses share.
pub async fn common<S>(
  State(resolver): State<Arc<Resolver<S>>>,
  Json(body): Json<FriendPairBody>,
) -> Result<Json<FriendListResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let (first, second) = validate::email_pair(&body.friends)?;
  let friends = resolver.list_common_friends(first, second).await?;
  Ok(Json(FriendListResponse {
    success: true,
    count:   friends.len(),
    friends,
  }))
}
