//! Types FHIR R4 partagés par Organization et Location
//!
//! Représentation seule : le contrôle de conformité est dans `validate`.
//! Les valeurs codées à jeu fermé sont des enums.

use serde::{Deserialize, Serialize};

/// Coding - référence à un code d'une terminologie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    pub fn new(system: &str, code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            system: system.to_string(),
            code: code.into(),
            display: Some(display.into()),
        }
    }
}

/// CodeableConcept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,
}

/// Usage d'un identifiant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "use")]
    pub use_: IdentifierUse,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,
    pub system: String,
    pub value: String,
}

/// Period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: String,
}

/// Extension (uniquement valuePeriod est utilisé)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,
    pub value_period: Period,
}

/// Statut d'un Narrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStatus {
    Generated,
    Extensions,
    Additional,
    Empty,
}

/// Narrative (résumé XHTML)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub status: NarrativeStatus,
    pub div: String,
}

/// Meta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressUse {
    Home,
    Work,
    Temp,
    Old,
    Billing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Postal,
    Physical,
    Both,
}

/// Address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "use")]
    pub use_: AddressUse,
    #[serde(rename = "type")]
    pub type_: AddressType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointSystem {
    Phone,
    Fax,
    Email,
    Pager,
    Url,
    Sms,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointUse {
    Home,
    Work,
    Temp,
    Old,
    Mobile,
}

/// ContactPoint (téléphone, fax...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    pub system: ContactPointSystem,
    pub value: String,
    #[serde(rename = "use")]
    pub use_: ContactPointUse,
}

/// Reference vers une autre ressource (`Type/id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

/// Position WGS84 d'une Location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_serialization() {
        let identifier = Identifier {
            use_: IdentifierUse::Official,
            type_: None,
            system: "http://sirene.fr".to_string(),
            value: "26010004500012".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&identifier).unwrap(),
            json!({"use": "official", "system": "http://sirene.fr", "value": "26010004500012"})
        );
    }

    #[test]
    fn test_address_omits_absent_fields() {
        let address = Address {
            use_: AddressUse::Work,
            type_: AddressType::Postal,
            line: vec![],
            city: None,
            postal_code: None,
            country: "France".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&address).unwrap(),
            json!({"use": "work", "type": "postal", "country": "France"})
        );
    }

    #[test]
    fn test_extension_value_period() {
        let extension = Extension {
            url: "http://hl7.org/fhir/StructureDefinition/organization-period".to_string(),
            value_period: Period {
                start: "1979-02-13".to_string(),
            },
        };
        let value = serde_json::to_value(&extension).unwrap();
        assert_eq!(value["valuePeriod"]["start"], "1979-02-13");
    }
}
