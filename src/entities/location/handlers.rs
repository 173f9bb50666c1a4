//! HTTP handlers for locations

use super::model::{Location, LocationInput};
use crate::core::{ApiError, EntityKind, Payload, parse_id};
use crate::encoding::Profile;
use crate::resolver::ReferenceField;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

fn not_found() -> ApiError {
    ApiError::not_found(EntityKind::Location)
}

/// GET /locations
pub async fn list_locations(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let locations = state.locations.list().await?;
    tracing::debug!(count = locations.len(), "listed locations");
    Ok(Json(state.render_list(&locations)?))
}

/// POST /locations
pub async fn create_location(
    State(state): State<AppState>,
    Payload(mut input): Payload<LocationInput>,
) -> Result<Json<Value>, ApiError> {
    let raw_state = input
        .state
        .take()
        .ok_or_else(|| ApiError::missing_field("state"))?;
    let resolved = state
        .resolver
        .resolve(ReferenceField::State, &raw_state)
        .await?;

    let location = state
        .locations
        .create(Location::from_input(input, &resolved)?)
        .await?;
    tracing::info!(id = location.id, name = %location.name, "created location");

    Ok(Json(state.render_resolved(&location, &[&resolved])?))
}

/// PUT and DELETE on the collection need an id
pub async fn missing_location_id() -> ApiError {
    ApiError::missing_id(EntityKind::Location)
}

/// GET /locations/{id}
pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Location)?;
    let location = state.locations.get(id).await?.ok_or_else(not_found)?;
    tracing::debug!(id, "fetched location");
    Ok(Json(state.render(&location, Profile::Detail).await?))
}

/// PUT /locations/{id}
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(mut input): Payload<LocationInput>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Location)?;
    let mut location = state.locations.get(id).await?.ok_or_else(not_found)?;

    let resolved = state
        .resolver
        .resolve_present(ReferenceField::State, input.state.take().as_ref())
        .await?;
    location.apply(input, resolved.as_ref());

    let location = state
        .locations
        .update(id, location)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(id, "updated location");

    Ok(Json(state.render(&location, Profile::Detail).await?))
}

/// DELETE /locations/{id}
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Location)?;
    if !state.locations.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(id, "deleted location");
    Ok(Json(json!({ "deleted": true })))
}
