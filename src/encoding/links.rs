//! Hyperlink construction for encoded resources
//!
//! The encoder never looks routes up by name. It asks an injected
//! [`LinkBuilder`] for the path of a [`LinkTarget`], and the server mounts its
//! routes under the same base path.

use crate::core::EntityId;

/// Something an encoded resource can link to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Location(EntityId),
    Conference(EntityId),
    Attendee(EntityId),
    /// The presentation collection of a conference
    ConferencePresentations(EntityId),
}

/// Maps link targets to request paths
pub trait LinkBuilder: Send + Sync {
    fn href(&self, target: LinkTarget) -> String;
}

/// The path layout served by this crate's router
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePaths {
    base_path: String,
}

impl RoutePaths {
    /// Create paths rooted at `base_path` (e.g. `""` or `"/api"`)
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        let trimmed = base_path.trim_end_matches('/');
        let base_path = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl LinkBuilder for RoutePaths {
    fn href(&self, target: LinkTarget) -> String {
        let path = match target {
            LinkTarget::Location(id) => format!("/locations/{}", id),
            LinkTarget::Conference(id) => format!("/conferences/{}", id),
            LinkTarget::Attendee(id) => format!("/attendees/{}", id),
            LinkTarget::ConferencePresentations(id) => {
                format!("/conferences/{}/presentations", id)
            }
        };
        format!("{}{}", self.base_path, path)
    }
}
