//! Handler for `GET /users`.

use std::sync::Arc;

use axum::{Json, extract::State};
use roster_core::{Resolver, store::RelationshipStore};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
  pub success: bool,
  pub users:   Vec<String>,
  pub count:   usize,
}

/// `GET /users` — every account email, in repository order.
pub async fn list<S>(
  State(resolver): State<Arc<Resolver<S>>>,
) -> Result<Json<UserListResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  let users = resolver.list_all_users().await?;
  Ok(Json(UserListResponse {
    success: true,
    count:   users.len(),
    users,
  }))
}
