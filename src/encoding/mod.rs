//! Entity encoding: turns entities into nested JSON resources
//!
//! Encoding is table-driven. Each (entity kind, [`Profile`]) pair maps to an
//! ordered property list plus a link function (see [`profiles`]). For every
//! property the encoder reads the value off a [`FieldSource`], so it works on
//! stored entities and on bare [`FieldMap`](crate::core::FieldMap)s alike.
//!
//! Relation properties are expanded into nested summaries:
//!
//! ```text
//! location   -> {"name": ..., "href": "/locations/{id}"}
//! conference -> {"name": ..., "href": "/conferences/{id}"}
//! state      -> {"name": ..., "abbreviation": ...}
//! ```
//!
//! Summaries come from a [`RelationSnapshot`] the caller prefetched; paths come
//! from the injected [`LinkBuilder`]. The encoder is pure and never writes.

pub mod links;
pub mod profiles;
pub mod relations;

pub use links::{LinkBuilder, LinkTarget, RoutePaths};
pub use profiles::{ProfileSpec, output_keys, profile_spec};
pub use relations::{RelationSnapshot, RelationSummary};

use crate::core::{Entity, EntityKind, EntityRef, FieldSource, FieldValue};
use serde_json::{Map, Value};
use thiserror::Error;

/// Which shape of a resource to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Minimal shape used inside collections
    List,
    /// Full shape with nested relation summaries
    Detail,
}

/// Violations of the encoder contract.
///
/// These are programming errors between handlers and the encoder, never
/// client mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("no encoding profile for {kind}")]
    UnsupportedKind { kind: EntityKind },

    #[error("{kind} does not provide property '{property}'")]
    MissingProperty {
        kind: EntityKind,
        property: &'static str,
    },

    #[error("property '{property}' of {kind} refers to a {target}, which has no summary form")]
    UnsupportedRelation {
        kind: EntityKind,
        property: &'static str,
        target: EntityKind,
    },
}

/// Encodes entities against a prefetched relation snapshot
pub struct Encoder<'a> {
    links: &'a dyn LinkBuilder,
    relations: &'a RelationSnapshot,
}

impl<'a> Encoder<'a> {
    pub fn new(links: &'a dyn LinkBuilder, relations: &'a RelationSnapshot) -> Self {
        Self { links, relations }
    }

    /// Encode any field source as `kind` under `profile`
    pub fn encode(
        &self,
        source: &dyn FieldSource,
        kind: EntityKind,
        profile: Profile,
    ) -> Result<Value, EncodingError> {
        let spec = profile_spec(kind, profile).ok_or(EncodingError::UnsupportedKind { kind })?;

        let mut object = Map::new();
        for &property in spec.properties {
            let value = source
                .field_value(property)
                .ok_or(EncodingError::MissingProperty { kind, property })?;
            object.insert(property.to_string(), self.encode_value(kind, property, &value)?);
        }

        if let Some(target) = (spec.link)(source) {
            object.insert("href".to_string(), Value::String(self.links.href(target)));
        }

        Ok(Value::Object(object))
    }

    /// Encode a stored entity under `profile`
    pub fn encode_entity<T: Entity>(&self, entity: &T, profile: Profile) -> Result<Value, EncodingError> {
        self.encode(entity, T::KIND, profile)
    }

    /// Encode entities into `{"<plural>": [...]}`
    pub fn encode_collection<T: Entity>(
        &self,
        entities: &[T],
        profile: Profile,
    ) -> Result<Value, EncodingError> {
        let items = entities
            .iter()
            .map(|entity| self.encode_entity(entity, profile))
            .collect::<Result<Vec<_>, _>>()?;

        let mut envelope = Map::new();
        envelope.insert(T::KIND.plural().to_string(), Value::Array(items));
        Ok(Value::Object(envelope))
    }

    fn encode_value(
        &self,
        kind: EntityKind,
        property: &'static str,
        value: &FieldValue,
    ) -> Result<Value, EncodingError> {
        match value {
            FieldValue::Reference(target) => self.summarize(kind, property, *target),
            scalar => Ok(scalar.to_scalar_json().unwrap_or(Value::Null)),
        }
    }

    fn summarize(
        &self,
        kind: EntityKind,
        property: &'static str,
        target: EntityRef,
    ) -> Result<Value, EncodingError> {
        let link = match target.kind {
            EntityKind::State => None,
            EntityKind::Location => Some(LinkTarget::Location(target.id)),
            EntityKind::Conference => Some(LinkTarget::Conference(target.id)),
            other => {
                return Err(EncodingError::UnsupportedRelation {
                    kind,
                    property,
                    target: other,
                });
            }
        };

        let Some(summary) = self.relations.get(&target) else {
            return Ok(Value::Null);
        };

        let mut nested = Map::new();
        nested.insert("name".to_string(), Value::String(summary.name.clone()));
        match link {
            Some(link) => {
                nested.insert("href".to_string(), Value::String(self.links.href(link)));
            }
            None => {
                let abbreviation = summary.abbreviation.clone().map_or(Value::Null, Value::String);
                nested.insert("abbreviation".to_string(), abbreviation);
            }
        }
        Ok(Value::Object(nested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldMap;
    use crate::entities::{Attendee, Conference, ConferencePlan, Location, Presentation};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    const ALL_KINDS: [EntityKind; 4] = [
        EntityKind::Location,
        EntityKind::Conference,
        EntityKind::Attendee,
        EntityKind::Presentation,
    ];

    fn stored_location() -> Location {
        let mut location = Location::new("Hall A".to_string(), "Springfield".to_string(), 3, 13);
        location.id = 2;
        location
    }

    fn stored_conference() -> Conference {
        let plan = ConferencePlan {
            max_presentations: 40,
            max_attendees: 900,
            starts: Utc.with_ymd_and_hms(2024, 9, 10, 9, 0, 0).unwrap(),
            ends: Utc.with_ymd_and_hms(2024, 9, 13, 17, 0, 0).unwrap(),
        };
        let mut conference =
            Conference::new("RustConf".to_string(), "All things Rust".to_string(), plan, 2);
        conference.id = 5;
        conference
    }

    fn stored_attendee() -> Attendee {
        let mut attendee = Attendee::new(
            "Ada".to_string(),
            "ada@x.com".to_string(),
            Some("Acme".to_string()),
            5,
        );
        attendee.id = 8;
        attendee
    }

    fn snapshot() -> RelationSnapshot {
        [
            (
                EntityRef::new(EntityKind::State, 13),
                RelationSummary::state("Illinois", "IL"),
            ),
            (
                EntityRef::new(EntityKind::Location, 2),
                RelationSummary::named("Hall A"),
            ),
            (
                EntityRef::new(EntityKind::Conference, 5),
                RelationSummary::named("RustConf"),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_list_keys_are_subset_of_detail_keys() {
        for kind in ALL_KINDS {
            let list = output_keys(kind, Profile::List);
            let detail = output_keys(kind, Profile::Detail);
            assert!(!list.is_empty());
            for key in &list {
                assert!(detail.contains(key), "{kind}: '{key}' missing from detail");
            }
        }
    }

    #[test]
    fn test_name_or_title_in_both_profiles() {
        for kind in ALL_KINDS {
            let label = if kind == EntityKind::Presentation { "title" } else { "name" };
            assert!(output_keys(kind, Profile::List).contains(&label));
            assert!(output_keys(kind, Profile::Detail).contains(&label));
        }
    }

    #[test]
    fn test_location_detail_nests_state_without_href() {
        let relations = snapshot();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);

        let json = encoder
            .encode_entity(&stored_location(), Profile::Detail)
            .unwrap();

        assert_eq!(
            keys(&json),
            vec!["name", "city", "room_count", "created", "updated", "state", "href"]
        );
        assert_eq!(json["state"], json!({"name": "Illinois", "abbreviation": "IL"}));
        assert_eq!(json["room_count"], 3);
        assert_eq!(json["href"], "/locations/2");
    }

    #[test]
    fn test_conference_detail_nests_location_link() {
        let relations = snapshot();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);

        let json = encoder
            .encode_entity(&stored_conference(), Profile::Detail)
            .unwrap();

        assert_eq!(json["location"], json!({"name": "Hall A", "href": "/locations/2"}));
        assert_eq!(json["starts"], "2024-09-10T09:00:00Z");
        assert_eq!(json["max_attendees"], 900);
    }

    #[test]
    fn test_attendee_list_shape() {
        let relations = RelationSnapshot::new();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);

        let json = encoder
            .encode_entity(&stored_attendee(), Profile::List)
            .unwrap();

        assert_eq!(
            json,
            json!({"name": "Ada", "email": "ada@x.com", "href": "/attendees/8"})
        );
    }

    #[test]
    fn test_presentation_links_to_conference_collection() {
        let relations = snapshot();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);
        let presentation = Presentation {
            id: 31,
            presenter_name: "Ada".to_string(),
            company_name: None,
            presenter_email: "ada@x.com".to_string(),
            title: "Engines".to_string(),
            synopsis: "Notes".to_string(),
            status: "SUBMITTED".to_string(),
            created: Utc::now(),
            conference_id: 5,
        };

        let list = encoder.encode_entity(&presentation, Profile::List).unwrap();
        assert_eq!(list["href"], "/conferences/5/presentations");
        assert_eq!(keys(&list), vec!["title", "status", "href"]);

        let detail = encoder.encode_entity(&presentation, Profile::Detail).unwrap();
        assert_eq!(detail["href"], "/conferences/5/presentations");
        assert_eq!(detail["company_name"], Value::Null);
        assert_eq!(
            detail["conference"],
            json!({"name": "RustConf", "href": "/conferences/5"})
        );
    }

    #[test]
    fn test_unset_or_unknown_relation_encodes_as_null() {
        let relations = RelationSnapshot::new();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);

        let mut attendee = stored_attendee();
        let json = encoder.encode_entity(&attendee, Profile::Detail).unwrap();
        assert_eq!(json["conference"], Value::Null);

        attendee.conference_id = None;
        let json = encoder.encode_entity(&attendee, Profile::Detail).unwrap();
        assert_eq!(json["conference"], Value::Null);
        assert!(json.as_object().unwrap().contains_key("conference"));
    }

    #[test]
    fn test_field_map_encodes_like_an_entity() {
        let relations = snapshot();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);
        let mut fields = FieldMap::new();
        fields.insert("id".to_string(), FieldValue::Integer(8));
        fields.insert("name".to_string(), FieldValue::from("Ada"));
        fields.insert("email".to_string(), FieldValue::from("ada@x.com"));

        let json = encoder
            .encode(&fields, EntityKind::Attendee, Profile::List)
            .unwrap();
        let expected = encoder
            .encode_entity(&stored_attendee(), Profile::List)
            .unwrap();
        assert_eq!(json, expected);
    }

    #[test]
    fn test_unsaved_field_map_has_no_href() {
        let relations = RelationSnapshot::new();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);
        let mut fields = FieldMap::new();
        fields.insert("name".to_string(), FieldValue::from("RustConf"));

        let json = encoder
            .encode(&fields, EntityKind::Conference, Profile::List)
            .unwrap();
        assert_eq!(json, json!({"name": "RustConf"}));
    }

    #[test]
    fn test_missing_property_is_contract_violation() {
        let relations = RelationSnapshot::new();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);
        let fields = FieldMap::new();

        let err = encoder
            .encode(&fields, EntityKind::Attendee, Profile::List)
            .unwrap_err();
        assert_eq!(
            err,
            EncodingError::MissingProperty {
                kind: EntityKind::Attendee,
                property: "name"
            }
        );
    }

    #[test]
    fn test_state_has_no_profile() {
        let relations = RelationSnapshot::new();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);
        let state = crate::entities::State::new("Illinois", "IL");

        let err = encoder.encode_entity(&state, Profile::Detail).unwrap_err();
        assert_eq!(err, EncodingError::UnsupportedKind { kind: EntityKind::State });
    }

    #[test]
    fn test_relation_to_unsummarizable_kind_is_rejected() {
        let relations = RelationSnapshot::new();
        let paths = RoutePaths::default();
        let encoder = Encoder::new(&paths, &relations);
        let mut fields = FieldMap::new();
        fields.insert("name".to_string(), FieldValue::from("Hall A"));
        fields.insert("city".to_string(), FieldValue::from("Springfield"));
        fields.insert("room_count".to_string(), FieldValue::Integer(3));
        fields.insert("created".to_string(), FieldValue::DateTime(Utc::now()));
        fields.insert("updated".to_string(), FieldValue::DateTime(Utc::now()));
        fields.insert(
            "state".to_string(),
            FieldValue::Reference(EntityRef::new(EntityKind::Attendee, 1)),
        );

        let err = encoder
            .encode(&fields, EntityKind::Location, Profile::Detail)
            .unwrap_err();
        assert!(matches!(err, EncodingError::UnsupportedRelation { .. }));
    }

    #[test]
    fn test_collection_envelope() {
        let relations = RelationSnapshot::new();
        let paths = RoutePaths::new("/api");
        let encoder = Encoder::new(&paths, &relations);

        let json = encoder
            .encode_collection(&[stored_attendee()], Profile::List)
            .unwrap();
        assert_eq!(json["attendees"][0]["href"], "/api/attendees/8");
        assert_eq!(json["attendees"].as_array().unwrap().len(), 1);
    }
}
