//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by a [`Resolver`] over any
//! [`RelationshipStore`]. This crate is transport only: request decoding,
//! field validation, and status-code mapping. Business rules live in
//! `roster-core`.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(resolver.clone()))
//! ```

pub mod blocks;
pub mod broadcasts;
pub mod error;
pub mod friends;
pub mod subscriptions;
pub mod users;
pub mod validate;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::{Resolver, store::RelationshipStore};
use serde::{Deserialize, Serialize};

pub use error::ApiError;

/// Body-less success envelope returned by the create endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
  pub success: bool,
}

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

/// Build a fully-materialised API router for `resolver`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(resolver: Arc<Resolver<S>>) -> Router<()>
where
  S: RelationshipStore + 'static,
{
  Router::new()
    // Users
    .route("/users", get(users::list::<S>))
    // Friendships
    .route("/friends", post(friends::create::<S>))
    .route("/friends/list", post(friends::list::<S>))
    .route("/friends/common", post(friends::common::<S>))
    // Directed relations
    .route("/subscriptions", post(subscriptions::create::<S>))
    .route("/blocks", post(blocks::create::<S>))
    // Broadcasts
    .route("/broadcasts/recipients", post(broadcasts::recipients::<S>))
    .with_state(resolver)
}
