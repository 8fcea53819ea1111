//! # finess-fhir
//!
//! Conversion du répertoire FINESS (établissements sanitaires et sociaux)
//! en ressources FHIR R4 `Organization` et `Location`, au format NDJSON.
//!
//! ## Features
//!
//! - Mapping FINESS → Organization (profils `standard` et `extended`)
//! - Reprojection Lambert-93 → WGS84 en Rust pur pour les Location
//! - Validation de chaque ressource avant écriture
//! - Génération par tranche et rapport de génération
//!
//! ## Usage CLI
//!
//! ```bash
//! # Tout le fichier
//! finess-fhir generate --finess-file ./etalab.csv
//!
//! # Une tranche, profil standard, avec rapport JSON
//! finess-fhir generate --finess-file ./etalab.csv --start 0 --end 500 \
//!     --config standard --report report.json
//!
//! # Statistiques du fichier source
//! finess-fhir inspect --finess-file ./etalab.csv
//! ```

pub mod config;
pub mod export;
pub mod fhir;
pub mod mapping;
pub mod report;
pub mod reproject_lite;

pub use config::{Config, MappingProfile};
pub use export::{GenerateError, Generator, NdjsonWriter};
pub use report::{GenerationReport, RunStatus};
