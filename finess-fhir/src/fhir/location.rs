//! Ressource FHIR Location

use serde::{Deserialize, Serialize};

use super::types::{Position, Reference};

/// Location (position GPS d'une entité géographique)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub resource_type: String,
    pub id: String,
    pub position: Position,
    pub managing_organization: Reference,
}

impl Location {
    pub const RESOURCE_TYPE: &'static str = "Location";

    pub fn new(id: impl Into<String>, position: Position, managing_organization: String) -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: id.into(),
            position,
            managing_organization: Reference {
                reference: managing_organization,
            },
        }
    }
}
