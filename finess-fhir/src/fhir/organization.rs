//! Ressource FHIR Organization

use serde::{Deserialize, Serialize};

use super::types::{
    Address, CodeableConcept, ContactPoint, Extension, Identifier, Meta, Narrative,
};

/// Organization (entité géographique FINESS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub resource_type: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub type_: Vec<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
}

impl Organization {
    pub const RESOURCE_TYPE: &'static str = "Organization";

    /// Organization vide avec son identifiant logique
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: id.into(),
            meta: None,
            text: None,
            extension: Vec::new(),
            identifier: Vec::new(),
            active: None,
            type_: Vec::new(),
            name: None,
            telecom: Vec::new(),
            address: Vec::new(),
        }
    }

    /// Référence littérale vers cette organisation
    pub fn reference(&self) -> String {
        format!("{}/{}", Self::RESOURCE_TYPE, self.id)
    }
}
