//! Contrôle structurel des ressources avant sérialisation
//!
//! Sous-ensemble des règles FHIR R4 que le mapping doit respecter :
//! formats des types primitifs (id, code, uri, dateTime, instant),
//! chaînes non vides, invariants org-1 et forme des références.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::location::Location;
use super::organization::Organization;
use super::types::{Address, CodeableConcept, ContactPoint, Identifier};

const ID_PATTERN: &str = r"^[A-Za-z0-9\-\.]{1,64}$";
const CODE_PATTERN: &str = r"^[^\s]+( [^\s]+)*$";
const URI_PATTERN: &str = r"^\S+$";
const DATE_TIME_PATTERN: &str = r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]{1,9})?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)))?)?)?$";
const INSTANT_PATTERN: &str = r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]{1,9})?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00))$";
const XHTML_NS: &str = r#"xmlns="http://www.w3.org/1999/xhtml""#;

/// Un défaut relevé sur un champ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Chemin du champ (ex: `identifier[1].value`)
    pub path: String,
    pub reason: String,
}

/// Échec de validation d'une ressource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{resource_type} {id:?}: {} validation error(s){}",
    .issues.len(),
    format_issues(.issues)
)]
pub struct ValidationError {
    pub resource_type: &'static str,
    pub id: String,
    pub issues: Vec<Issue>,
}

fn format_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|issue| format!("; {}: {}", issue.path, issue.reason))
        .collect()
}

/// Ressource soumise au contrôle structurel
pub trait Validate {
    const RESOURCE_TYPE: &'static str;

    /// Identifiant logique, pour les diagnostics
    fn id(&self) -> &str;

    /// Relève les défauts dans `checker`
    fn check(&self, checker: &mut Checker);
}

/// Ressource refusée, rendue telle quelle pour le diagnostic
#[derive(Debug, Clone)]
pub struct Rejected<R> {
    pub resource: R,
    pub error: ValidationError,
}

/// Ressource ayant passé la validation, prête à être sérialisée
#[derive(Debug, Clone)]
pub struct Validated<R>(R);

impl<R: Validate + Serialize> Validated<R> {
    /// Valide la ressource
    ///
    /// # Errors
    ///
    /// `Rejected` rend la ressource avec la liste de tous les défauts relevés.
    pub fn new(resource: R) -> Result<Self, Rejected<R>> {
        let mut checker = Checker::default();
        resource.check(&mut checker);

        if checker.issues.is_empty() {
            return Ok(Self(resource));
        }

        let error = ValidationError {
            resource_type: R::RESOURCE_TYPE,
            id: resource.id().to_string(),
            issues: checker.issues,
        };
        Err(Rejected { resource, error })
    }

    pub fn inner(&self) -> &R {
        &self.0
    }
}

/// Accumulateur de défauts
#[derive(Debug, Default)]
pub struct Checker {
    issues: Vec<Issue>,
}

impl Checker {
    fn fail(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(Issue {
            path: path.into(),
            reason: reason.into(),
        });
    }

    fn pattern(&mut self, path: &str, value: &str, regex: &Regex, kind: &str) {
        if !regex.is_match(value) {
            self.fail(path, format!("{value:?} is not a valid {kind}"));
        }
    }

    fn string(&mut self, path: &str, value: &str) {
        if value.is_empty() {
            self.fail(path, "empty string");
        }
    }

    fn resource_type(&mut self, value: &str, expected: &str) {
        if value != expected {
            self.fail("resourceType", format!("expected {expected}, got {value:?}"));
        }
    }

    fn id(&mut self, path: &str, value: &str) {
        self.pattern(path, value, regex(&ID, ID_PATTERN), "id");
    }

    fn code(&mut self, path: &str, value: &str) {
        self.pattern(path, value, regex(&CODE, CODE_PATTERN), "code");
    }

    fn uri(&mut self, path: &str, value: &str) {
        self.pattern(path, value, regex(&URI, URI_PATTERN), "uri");
    }

    fn date_time(&mut self, path: &str, value: &str) {
        self.pattern(path, value, regex(&DATE_TIME, DATE_TIME_PATTERN), "dateTime");
    }

    fn instant(&mut self, path: &str, value: &str) {
        self.pattern(path, value, regex(&INSTANT, INSTANT_PATTERN), "instant");
    }

    fn codeable_concept(&mut self, path: &str, concept: &CodeableConcept) {
        for (i, coding) in concept.coding.iter().enumerate() {
            self.uri(&format!("{path}.coding[{i}].system"), &coding.system);
            self.code(&format!("{path}.coding[{i}].code"), &coding.code);
            if let Some(display) = &coding.display {
                self.string(&format!("{path}.coding[{i}].display"), display);
            }
        }
    }

    fn identifier(&mut self, path: &str, identifier: &Identifier) {
        if let Some(type_) = &identifier.type_ {
            self.codeable_concept(&format!("{path}.type"), type_);
        }
        self.uri(&format!("{path}.system"), &identifier.system);
        self.string(&format!("{path}.value"), &identifier.value);
    }

    fn address(&mut self, path: &str, address: &Address) {
        for (i, line) in address.line.iter().enumerate() {
            self.string(&format!("{path}.line[{i}]"), line);
        }
        if let Some(city) = &address.city {
            self.string(&format!("{path}.city"), city);
        }
        if let Some(postal_code) = &address.postal_code {
            self.string(&format!("{path}.postalCode"), postal_code);
        }
        self.string(&format!("{path}.country"), &address.country);
    }

    fn contact_point(&mut self, path: &str, contact: &ContactPoint) {
        self.string(&format!("{path}.value"), &contact.value);
    }

    fn decimal(&mut self, path: &str, value: f64, bound: f64) {
        if !value.is_finite() {
            self.fail(path, format!("{value} is not a finite decimal"));
        } else if value.abs() > bound {
            self.fail(path, format!("{value} is out of range [-{bound}, {bound}]"));
        }
    }
}

static ID: OnceLock<Regex> = OnceLock::new();
static CODE: OnceLock<Regex> = OnceLock::new();
static URI: OnceLock<Regex> = OnceLock::new();
static DATE_TIME: OnceLock<Regex> = OnceLock::new();
static INSTANT: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("hard-coded FHIR pattern"))
}

impl Validate for Organization {
    const RESOURCE_TYPE: &'static str = Organization::RESOURCE_TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self, c: &mut Checker) {
        c.resource_type(&self.resource_type, Self::RESOURCE_TYPE);
        c.id("id", &self.id);

        if let Some(meta) = &self.meta {
            c.instant("meta.lastUpdated", &meta.last_updated);
        }

        if let Some(text) = &self.text {
            let div = text.div.trim();
            if !(div.starts_with("<div") && div.ends_with("</div>") && div.contains(XHTML_NS)) {
                c.fail("text.div", "must be an XHTML <div> element");
            }
        }

        for (i, extension) in self.extension.iter().enumerate() {
            c.uri(&format!("extension[{i}].url"), &extension.url);
            c.date_time(
                &format!("extension[{i}].valuePeriod.start"),
                &extension.value_period.start,
            );
        }

        for (i, identifier) in self.identifier.iter().enumerate() {
            c.identifier(&format!("identifier[{i}]"), identifier);
        }

        for (i, concept) in self.type_.iter().enumerate() {
            c.codeable_concept(&format!("type[{i}]"), concept);
        }

        if let Some(name) = &self.name {
            c.string("name", name);
        }

        // org-1
        if self.name.is_none() && self.identifier.is_empty() {
            c.fail("Organization", "org-1: must have at least a name or an identifier");
        }

        for (i, contact) in self.telecom.iter().enumerate() {
            c.contact_point(&format!("telecom[{i}]"), contact);
        }

        for (i, address) in self.address.iter().enumerate() {
            c.address(&format!("address[{i}]"), address);
        }
    }
}

impl Validate for Location {
    const RESOURCE_TYPE: &'static str = Location::RESOURCE_TYPE;

    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self, c: &mut Checker) {
        c.resource_type(&self.resource_type, Self::RESOURCE_TYPE);
        c.id("id", &self.id);
        c.decimal("position.longitude", self.position.longitude, 180.0);
        c.decimal("position.latitude", self.position.latitude, 90.0);

        let reference = &self.managing_organization.reference;
        match reference.strip_prefix("Organization/") {
            Some(target) => c.id("managingOrganization.reference", target),
            None => c.fail(
                "managingOrganization.reference",
                format!("{reference:?} is not an Organization reference"),
            ),
        }
    }
}
