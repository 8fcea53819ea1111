//! Modèle FHIR R4 (Organization, Location) et contrôle structurel

pub mod location;
pub mod organization;
pub mod types;
pub mod validate;

pub use location::Location;
pub use organization::Organization;
pub use validate::{Issue, Rejected, Validate, Validated, ValidationError};
