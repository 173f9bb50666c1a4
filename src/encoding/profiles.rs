//! Property tables for every (entity kind, profile) pair

use super::Profile;
use super::links::LinkTarget;
use crate::core::{EntityKind, FieldSource, FieldValue};

/// How to encode one entity kind under one profile
#[derive(Clone, Copy)]
pub struct ProfileSpec {
    pub kind: EntityKind,
    pub profile: Profile,
    /// Properties copied from the source, in output order
    pub properties: &'static [&'static str],
    /// Computes the `href` appended after the properties
    pub link: fn(&dyn FieldSource) -> Option<LinkTarget>,
}

static PROFILES: &[ProfileSpec] = &[
    ProfileSpec {
        kind: EntityKind::Location,
        profile: Profile::List,
        properties: &["name"],
        link: location_link,
    },
    ProfileSpec {
        kind: EntityKind::Location,
        profile: Profile::Detail,
        properties: &["name", "city", "room_count", "created", "updated", "state"],
        link: location_link,
    },
    ProfileSpec {
        kind: EntityKind::Conference,
        profile: Profile::List,
        properties: &["name"],
        link: conference_link,
    },
    ProfileSpec {
        kind: EntityKind::Conference,
        profile: Profile::Detail,
        properties: &[
            "name",
            "description",
            "max_presentations",
            "max_attendees",
            "starts",
            "ends",
            "created",
            "updated",
            "location",
        ],
        link: conference_link,
    },
    ProfileSpec {
        kind: EntityKind::Attendee,
        profile: Profile::List,
        properties: &["name", "email"],
        link: attendee_link,
    },
    ProfileSpec {
        kind: EntityKind::Attendee,
        profile: Profile::Detail,
        properties: &["email", "name", "company_name", "created", "conference"],
        link: attendee_link,
    },
    ProfileSpec {
        kind: EntityKind::Presentation,
        profile: Profile::List,
        properties: &["title", "status"],
        link: presentation_link,
    },
    ProfileSpec {
        kind: EntityKind::Presentation,
        profile: Profile::Detail,
        properties: &[
            "presenter_name",
            "company_name",
            "presenter_email",
            "title",
            "synopsis",
            "created",
            "status",
            "conference",
        ],
        link: presentation_link,
    },
];

/// Look up the encoding table entry for a kind and profile; states have none
pub fn profile_spec(kind: EntityKind, profile: Profile) -> Option<&'static ProfileSpec> {
    PROFILES
        .iter()
        .find(|spec| spec.kind == kind && spec.profile == profile)
}

/// Keys emitted for a kind and profile, computed `href` included
pub fn output_keys(kind: EntityKind, profile: Profile) -> Vec<&'static str> {
    profile_spec(kind, profile)
        .map(|spec| {
            let mut keys = spec.properties.to_vec();
            keys.push("href");
            keys
        })
        .unwrap_or_default()
}

fn identity(source: &dyn FieldSource) -> Option<i64> {
    source.field_value("id").and_then(|value| value.as_integer())
}

fn location_link(source: &dyn FieldSource) -> Option<LinkTarget> {
    identity(source).map(LinkTarget::Location)
}

fn conference_link(source: &dyn FieldSource) -> Option<LinkTarget> {
    identity(source).map(LinkTarget::Conference)
}

fn attendee_link(source: &dyn FieldSource) -> Option<LinkTarget> {
    identity(source).map(LinkTarget::Attendee)
}

// Presentations link to their conference's collection, not to themselves.
fn presentation_link(source: &dyn FieldSource) -> Option<LinkTarget> {
    match source.field_value("conference") {
        Some(FieldValue::Reference(conference)) => {
            Some(LinkTarget::ConferencePresentations(conference.id))
        }
        _ => None,
    }
}
