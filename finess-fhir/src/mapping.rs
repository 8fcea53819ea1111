//! Mapping d'une ligne FINESS vers les ressources Organization / Location
//!
//! Le mapping produit des structures brutes, sans contrôle : la validation
//! est une étape séparée (`fhir::validate`), ce qui permet de tester les
//! règles de mapping isolément.

use std::sync::OnceLock;

use finess::{EstablishmentRecord, GeoEntry};
use regex::Regex;

use crate::config::{Config, MappingProfile};
use crate::fhir::types::{
    Address, AddressType, AddressUse, CodeableConcept, Coding, ContactPoint, ContactPointSystem,
    ContactPointUse, Extension, Identifier, IdentifierUse, Meta, Narrative, NarrativeStatus,
    Period, Position,
};
use crate::fhir::{Location, Organization};
use crate::reproject_lite::{convert, Conversion, CoordinateError};

pub const ORGANIZATION_PERIOD_URL: &str =
    "http://hl7.org/fhir/StructureDefinition/organization-period";
pub const IDENTIFIER_TYPE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v2-0203";
pub const FINESS_ET_SYSTEM: &str = "urn:oid:1.2.250.1.71.4.2.2";
pub const SIRET_SYSTEM: &str = "http://sirene.fr";
pub const ORGANIZATION_TYPE_SYSTEM: &str = "http://hl7.org/fhir/organization-type";
pub const ENTITY_TYPE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v2-3307";
pub const APE_SYSTEM: &str =
    "https://mos.esante.gouv.fr/NOS/TRE_R75-InseeNAFrev2Niveau5/FHIR/TRE-R75-InseeNAFrev2Niveau5";
pub const CATEGORY_SYSTEM: &str = "http://finess.sante.gouv.fr/valuesets/CAT_ETAB";
pub const AGGREGATED_CATEGORY_SYSTEM: &str = "http://finess.sante.gouv.fr/valuesets/CAT_AGR_ETAB";
pub const SECTOR_SYSTEM: &str = "http://finess.sante.gouv.fr/valuesets/SPH";

/// Suffixe de l'id d'une Location
pub const LOCATION_SUFFIX: &str = "-loc";

/// Issue du mapping de la Location d'un établissement
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    /// Position calculée
    Located {
        location: Location,
        conversion: Conversion,
    },
    /// Aucune géolocalisation pour ce `nofinesset`
    NotGeolocated,
    /// Coordonnées brutes non numériques
    InvalidCoordinates(CoordinateError),
}

/// Ressources construites pour un établissement
#[derive(Debug, Clone, PartialEq)]
pub struct Resources {
    pub organization: Organization,
    pub location: LocationOutcome,
}

/// Identifiant logique commun : `{nofinessej}-{nofinesset}`
pub fn resource_id(record: &EstablishmentRecord) -> String {
    format!("{}-{}", record.nofinessej.trim(), record.nofinesset.trim())
}

/// Construit l'Organization et, si une géolocalisation existe, la Location
pub fn build(record: &EstablishmentRecord, geo: Option<&GeoEntry>, config: &Config) -> Resources {
    let organization = build_organization(record, config);

    let location = match geo {
        None => LocationOutcome::NotGeolocated,
        Some(geo) => match build_location(&organization, geo) {
            Ok((location, conversion)) => LocationOutcome::Located {
                location,
                conversion,
            },
            Err(e) => LocationOutcome::InvalidCoordinates(e),
        },
    };

    Resources {
        organization,
        location,
    }
}

/// Construit l'Organization d'un établissement
pub fn build_organization(record: &EstablishmentRecord, config: &Config) -> Organization {
    let mut org = Organization::new(resource_id(record));

    org.extension.push(Extension {
        url: ORGANIZATION_PERIOD_URL.to_string(),
        value_period: Period {
            start: record.dateouv.clone(),
        },
    });

    org.identifier.push(Identifier {
        use_: IdentifierUse::Official,
        type_: Some(CodeableConcept {
            coding: vec![Coding::new(
                IDENTIFIER_TYPE_SYSTEM,
                "FINEG",
                "FINESS d'entité géographique",
            )],
        }),
        system: FINESS_ET_SYSTEM.to_string(),
        value: record.nofinesset.clone(),
    });

    if !record.siret.is_empty() {
        org.identifier.push(Identifier {
            use_: IdentifierUse::Official,
            type_: None,
            system: SIRET_SYSTEM.to_string(),
            value: record.siret.clone(),
        });
    }

    org.type_.push(CodeableConcept {
        coding: type_codings(record, config.profile),
    });

    org.active = Some(true);

    org.text = Some(Narrative {
        status: NarrativeStatus::Generated,
        div: format!(
            r#"<div xmlns="http://www.w3.org/1999/xhtml">Entité Géographique - finess {}</div>"#,
            record.nofinesset
        ),
    });

    let name = record.rs.trim();
    if !name.is_empty() {
        org.name = Some(name.to_string());
    }

    if !record.datemaj.is_empty() {
        org.meta = Some(Meta {
            last_updated: format!("{}T00:00:00Z", record.datemaj),
        });
    }

    org.address.push(build_address(record, &config.country));

    if !record.telephone.is_empty() {
        org.telecom.push(ContactPoint {
            system: ContactPointSystem::Phone,
            value: record.telephone.clone(),
            use_: ContactPointUse::Work,
        });
    }

    org
}

fn type_codings(record: &EstablishmentRecord, profile: MappingProfile) -> Vec<Coding> {
    let mut coding = vec![
        Coding::new(ORGANIZATION_TYPE_SYSTEM, "prov", "Healthcare Provider"),
        Coding::new(ENTITY_TYPE_SYSTEM, "GEOGRAPHICAL-ENTITY", "Entité géographique"),
    ];

    if !record.codeape.is_empty() {
        coding.push(Coding::new(APE_SYSTEM, &record.codeape, "Code APE"));
    }

    let always = profile == MappingProfile::Standard;
    if always || !record.categetab.is_empty() {
        coding.push(labelled(CATEGORY_SYSTEM, &record.categetab, &record.libcategetab));
    }
    if always || !record.categagretab.is_empty() {
        coding.push(labelled(
            AGGREGATED_CATEGORY_SYSTEM,
            &record.categagretab,
            &record.libcategagretab,
        ));
    }

    if !record.codesph.is_empty() {
        coding.push(labelled(SECTOR_SYSTEM, &record.codesph, &record.libsph));
    }

    coding
}

/// Coding dont le libellé n'est renseigné que s'il est non vide
fn labelled(system: &str, code: &str, label: &str) -> Coding {
    Coding {
        system: system.to_string(),
        code: code.to_string(),
        display: (!label.is_empty()).then(|| label.to_string()),
    }
}

fn build_address(record: &EstablishmentRecord, country: &str) -> Address {
    let mut line = Vec::new();

    let street: Vec<&str> = [
        record.numvoie.as_str(),
        record.typvoie.as_str(),
        record.compvoie.as_str(),
        record.voie.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();
    if !street.is_empty() {
        line.push(street.join(" "));
    }

    if !record.lieuditbp.is_empty() {
        line.push(record.lieuditbp.clone());
    }

    let (postal_code, city) = match split_municipality(&record.ligneacheminement) {
        Some((postal_code, city)) => (
            Some(postal_code.to_string()),
            (!city.is_empty()).then(|| city.to_string()),
        ),
        None => (None, None),
    };

    Address {
        use_: AddressUse::Work,
        type_: AddressType::Postal,
        line,
        city,
        postal_code,
        country: country.to_string(),
    }
}

/// Découpe la ligne d'acheminement `"13005 MARSEILLE"` en `("13005", "MARSEILLE")`
pub fn split_municipality(ligne: &str) -> Option<(&str, &str)> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"^(\d+)\s(.*)$").expect("hard-coded pattern"));

    let captures = pattern.captures(ligne)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Construit la Location rattachée à `organization` depuis sa géolocalisation
///
/// # Errors
///
/// `CoordinateError` si les coordonnées brutes ne sont pas numériques.
pub fn build_location(
    organization: &Organization,
    geo: &GeoEntry,
) -> Result<(Location, Conversion), CoordinateError> {
    let (point, conversion) = convert(&geo.coordxet, &geo.coordyet, &geo.sourcecoordet)?;

    let location = Location::new(
        format!("{}{}", organization.id, LOCATION_SUFFIX),
        Position {
            longitude: point.x(),
            latitude: point.y(),
        },
        organization.reference(),
    );

    Ok((location, conversion))
}
