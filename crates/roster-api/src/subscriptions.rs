//! Handler for `POST /subscriptions`.

use std::sync::Arc;

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use roster_core::{Resolver, store::RelationshipStore};
use serde::Deserialize;

use crate::{StatusResponse, error::ApiError, validate};

/// Shared body shape for the directed relations (subscriptions, blocks).
#[derive(Debug, Deserialize)]
pub struct RequestorTargetBody {
  #[serde(default)]
  pub requestor: String,
  #[serde(default)]
  pub target:    String,
}

/// `POST /subscriptions` — subscribe `requestor` to `target`'s broadcasts.
pub async fn create<S>(
  State(resolver): State<Arc<Resolver<S>>>,
  Json(body): Json<RequestorTargetBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RelationshipStore + 'static,
{
  validate::requestor_target(&body.requestor, &body.target)?;
  resolver.create_subscription(&body.requestor, &body.target).await?;
  Ok((StatusCode::CREATED, Json(StatusResponse { success: true })))
}
