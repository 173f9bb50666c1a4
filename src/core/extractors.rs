//! Request extractors that report failures as [`ApiError`]
//!
//! axum's stock `Json` and `Path` extractors reject with plain-text bodies;
//! these wrappers keep every rejection in the `{"message": ...}` shape.

use crate::core::entity::{EntityId, EntityKind};
use crate::core::error::ApiError;
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};

/// JSON request body that rejects with a 400 [`ApiError`]
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(ApiError::malformed(rejection.body_text())),
        }
    }
}

/// Deserialize a payload field whose presence matters, `null` included.
///
/// Use with `#[serde(default, deserialize_with = "present")]`: an absent key
/// stays `None`, while an explicit `null` arrives as `Some` of the null value.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Parse an id path segment.
///
/// Ids are positive integers; anything else cannot name a stored entity, so it
/// is reported as not found for the addressed kind.
pub fn parse_id(raw: &str, kind: EntityKind) -> Result<EntityId, ApiError> {
    raw.parse::<EntityId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::not_found(kind))
}
