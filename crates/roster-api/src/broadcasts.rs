//! Handler for `POST /broadcasts/recipients`.

use std::sync::Arc;

use axum::{Json, extract::State};
use roster_core::{Resolver, store::RelationshipStore};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, validate};

#[derive(Debug, Deserialize)]
pub struct BroadcastBody {
  #[serde(default)]
  pub sender: String,
  /// Message text; may be empty, and may mention extra recipient
  /// addresses inline.
  #[serde(default)]
  pub text:   String,
}

#[derive(Debug, Serialize)]
pub struct RecipientsResponse {
  pub success:    bool,
  pub recipients: Vec<String>,
}

/// `POST /broadcasts/recipients` — who should receive `sender`'s message.
pub async fn recipients<S>(
  State(resolver): State<Arc<Resolver<S>>>,
  Json(body): Json<BroadcastBody>,
) -> Result<Json<RecipientsResponse>, ApiError>
where
  S: RelationshipStore + 'static,
{
  validate::email("sender", &body.sender)?;
  let recipients = resolver
    .list_broadcast_recipients(&body.sender, &body.text)
    .await?;
  Ok(Json(RecipientsResponse { success: true, recipients }))
}
