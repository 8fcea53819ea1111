//! # finess
//!
//! Parser pour l'extraction etalab du fichier FINESS des établissements
//! sanitaires et sociaux.
//!
//! ## Features
//!
//! - Décodage de l'encodage historique (ISO-8859-1) via `encoding_rs`
//! - Découpage `memchr` des lignes `structureet` et `geolocalisation`
//! - Index des géolocalisations par N° FINESS d'entité géographique
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finess::{parse, GeoIndex, SourceEncoding};
//! use std::path::Path;
//!
//! let registry = parse(Path::new("etalab-cs1100507.csv"), SourceEncoding::default())?;
//! let index = GeoIndex::build(&registry.geolocations);
//!
//! for etab in &registry.establishments {
//!     println!("{} géolocalisé: {}", etab.nofinesset, index.get(&etab.nofinesset).is_some());
//! }
//! ```

pub mod encoding;
pub mod error;
pub mod geo_index;
pub mod parser;
pub mod types;

pub use encoding::{SourceEncoding, DEFAULT_ENCODING};
pub use error::FinessError;
pub use geo_index::{GeoEntry, GeoIndex};
pub use types::{EstablishmentRecord, GeoRecord, Registry};

use std::path::Path;

use tracing::info;

/// Lit et parse un fichier FINESS.
///
/// # Arguments
///
/// * `path` - Chemin vers l'extraction etalab (`.csv`)
/// * `encoding` - Stratégie de décodage du fichier
///
/// # Errors
///
/// Retourne `FinessError::Io` si le fichier est illisible. Les lignes de type
/// inconnu ne sont pas des erreurs : elles sont comptées puis ignorées.
pub fn parse(path: &Path, encoding: SourceEncoding) -> Result<Registry, FinessError> {
    info!(path = %path.display(), encoding = encoding.name(), "Loading FINESS file");

    let data = std::fs::read(path)?;
    let registry = parse_bytes(&data, encoding);

    info!(
        establishments = registry.establishments.len(),
        geolocations = registry.geolocations.len(),
        ignored = registry.ignored_lines,
        "FINESS file loaded"
    );

    Ok(registry)
}

/// Parse un contenu brut (non décodé)
pub fn parse_bytes(data: &[u8], encoding: SourceEncoding) -> Registry {
    let content = encoding::decode(data, encoding);
    parser::parse(&content)
}
