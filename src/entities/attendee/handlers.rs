//! HTTP handlers for attendees

use super::model::{Attendee, AttendeeInput};
use crate::core::{ApiError, EntityKind, EntityRef, FieldValue, Payload, parse_id};
use crate::encoding::Profile;
use crate::resolver::ReferenceField;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

fn not_found() -> ApiError {
    ApiError::not_found(EntityKind::Attendee)
}

/// GET /conferences/{conference_id}/attendees
///
/// An unknown conference simply has no attendees.
pub async fn list_attendees(
    State(state): State<AppState>,
    Path(conference_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let conference_id = parse_id(&conference_id, EntityKind::Conference)?;
    let scope = FieldValue::Reference(EntityRef::new(EntityKind::Conference, conference_id));
    let attendees = state.attendees.find_by("conference", &scope).await?;
    tracing::debug!(conference_id, count = attendees.len(), "listed attendees");
    Ok(Json(state.render_list(&attendees)?))
}

/// POST /conferences/{conference_id}/attendees
pub async fn create_attendee(
    State(state): State<AppState>,
    Path(conference_id): Path<String>,
    Payload(input): Payload<AttendeeInput>,
) -> Result<Json<Value>, ApiError> {
    // The route decides the conference; a `conference` key in the body is ignored.
    let resolved = state
        .resolver
        .resolve(ReferenceField::Conference, &Value::String(conference_id))
        .await?;

    let attendee = state
        .attendees
        .create(Attendee::from_input(input, &resolved)?)
        .await?;
    tracing::info!(id = attendee.id, conference_id = resolved.target.id, "created attendee");

    Ok(Json(state.render_resolved(&attendee, &[&resolved])?))
}

/// GET /attendees/{id}
pub async fn get_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Attendee)?;
    let attendee = state.attendees.get(id).await?.ok_or_else(not_found)?;
    tracing::debug!(id, "fetched attendee");
    Ok(Json(state.render(&attendee, Profile::Detail).await?))
}

/// PUT /attendees/{id}
pub async fn update_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(mut input): Payload<AttendeeInput>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Attendee)?;
    let mut attendee = state.attendees.get(id).await?.ok_or_else(not_found)?;

    let resolved = state
        .resolver
        .resolve_present(ReferenceField::Conference, input.conference.take().as_ref())
        .await?;
    attendee.apply(input, resolved.as_ref());

    let attendee = state
        .attendees
        .update(id, attendee)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(id, "updated attendee");

    Ok(Json(state.render(&attendee, Profile::Detail).await?))
}

/// DELETE /attendees/{id}
pub async fn delete_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, EntityKind::Attendee)?;
    if !state.attendees.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(id, "deleted attendee");
    Ok(Json(json!({ "deleted": true })))
}
