//! Handler for `POST /blocks`.

use std::sync::Arc;

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use roster_core::{Resolver, store::RelationshipStore};

use crate::{
  StatusResponse, error::ApiError, subscriptions::RequestorTargetBody,
  validate,
};

/// `POST /blocks` — block `target` on behalf of `requestor`.
///
/// Existing friendships and subscriptions stay in storage; derived views
/// filter them from now on.
pub async fn create<S>(
  State(resolver): State<Arc<Resolver<S>>>,
  Json(body): Json<RequestorTargetBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RelationshipStore + 'static,
{
  validate::requestor_target(&body.requestor, &body.target)?;
  resolver.create_block(&body.requestor, &body.target).await?;
  Ok((StatusCode::CREATED, Json(StatusResponse { success: true })))
}
