//! HTTP handlers for conferences

use super::model::{Conference, ConferenceInput};
use crate::core::{ApiError, EntityKind, Payload, parse_id};
use crate::encoding::Profile;
use crate::resolver::ReferenceField;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

fn not_found() -> ApiError {
    ApiError::not_found(EntityKind::Conference)
}

/// GET /conferences
pub async fn list_conferences(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let conferences = state.conferences.list().await?;
    tracing::debug!(count = conferences.len(), "listed conferences");
    Ok(Json(state.render_list(&conferences)?))
}

/// POST /conferences
pub async fn create_conference(
    State(state): State<AppState>,
    Payload(mut input): Payload<ConferenceInput>,
) -> Result<Json<Value>, ApiError> {
    let raw_location = input
        .location
        .take()
        .ok_or_else(|| ApiError::missing_field("location"))?;
    let resolved = state
        .resolver
        .resolve(ReferenceField::Location, &raw_location)
        .await?;

    let conference = state
        .conferences
        .create(Conference::from_input(input, &resolved)?)
        .await?;
    tracing::info!(id = conference.id, name = %conference.name, "created conference");

    Ok(Json(state.render_resolved(&conference, &[&resolved])?))
}

/// GET /conferences/{id}
pub async fn get_conference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Conference)?;
    let conference = state.conferences.get(id).await?.ok_or_else(not_found)?;
    tracing::debug!(id, "fetched conference");
    Ok(Json(state.render(&conference, Profile::Detail).await?))
}

/// PUT /conferences/{id}
pub async fn update_conference(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(mut input): Payload<ConferenceInput>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Conference)?;
    let mut conference = state.conferences.get(id).await?.ok_or_else(not_found)?;

    let resolved = state
        .resolver
        .resolve_present(ReferenceField::Location, input.location.take().as_ref())
        .await?;
    conference.apply(input, resolved.as_ref());

    let conference = state
        .conferences
        .update(id, conference)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(id, "updated conference");

    Ok(Json(state.render(&conference, Profile::Detail).await?))
}

/// DELETE /conferences/{id}
pub async fn delete_conference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Conference)?;
    if !state.conferences.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(id, "deleted conference");
    Ok(Json(json!({ "deleted": true })))
}
