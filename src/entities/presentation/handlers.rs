//! HTTP handlers for presentations

use super::model::{Presentation, PresentationInput};
use crate::core::{ApiError, EntityKind, EntityRef, FieldValue, Payload, parse_id};
use crate::encoding::Profile;
use crate::resolver::ReferenceField;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

fn not_found() -> ApiError {
    ApiError::not_found(EntityKind::Presentation)
}

/// GET /conferences/{conference_id}/presentations
pub async fn list_presentations(
    State(state): State<AppState>,
    Path(conference_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let conference_id = parse_id(&conference_id, EntityKind::Conference)?;
    let scope = FieldValue::Reference(EntityRef::new(EntityKind::Conference, conference_id));
    let presentations = state.presentations.find_by("conference", &scope).await?;
    tracing::debug!(conference_id, count = presentations.len(), "listed presentations");
    Ok(Json(state.render_list(&presentations)?))
}

/// POST /conferences/{conference_id}/presentations
pub async fn create_presentation(
    State(state): State<AppState>,
    Path(conference_id): Path<String>,
    Payload(input): Payload<PresentationInput>,
) -> Result<Json<Value>, ApiError> {
    let resolved = state
        .resolver
        .resolve(ReferenceField::Conference, &Value::String(conference_id))
        .await?;

    let presentation = state
        .presentations
        .create(Presentation::from_input(input, &resolved)?)
        .await?;
    tracing::info!(
        id = presentation.id,
        conference_id = resolved.target.id,
        status = %presentation.status,
        "created presentation"
    );

    Ok(Json(state.render_resolved(&presentation, &[&resolved])?))
}

/// GET /presentations/{id}
pub async fn get_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Presentation)?;
    let presentation = state.presentations.get(id).await?.ok_or_else(not_found)?;
    tracing::debug!(id, "fetched presentation");
    Ok(Json(state.render(&presentation, Profile::Detail).await?))
}

/// PUT /presentations/{id}
pub async fn update_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(mut input): Payload<PresentationInput>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Presentation)?;
    let mut presentation = state.presentations.get(id).await?.ok_or_else(not_found)?;

    let resolved = state
        .resolver
        .resolve_present(ReferenceField::Conference, input.conference.take().as_ref())
        .await?;
    presentation.apply(input, resolved.as_ref());

    let presentation = state
        .presentations
        .update(id, presentation)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(id, "updated presentation");

    Ok(Json(state.render(&presentation, Profile::Detail).await?))
}

/// DELETE /presentations/{id}
pub async fn delete_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Presentation)?;
    if !state.presentations.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(id, "deleted presentation");
    Ok(Json(json!({ "deleted": true })))
}
