//! Reprojection légère en Rust pur (sans dépendances externes)
//!
//! Supporte la projection des coordonnées FINESS de métropole :
//! - Lambert 93 (EPSG:2154) → WGS84 (EPSG:4326)
//!
//! Tout autre système source est considéré comme déjà exprimé en
//! longitude/latitude (voir [`convert`]).

mod convert;
mod ellipsoid;
mod lambert;

pub use convert::{convert, CoordinateError, Conversion};
pub use lambert::Lambert93;

/// Mapping des libellés `sourcecoordet` vers EPSG
const PROJECTIONS: &[(&str, u32)] = &[("LAMBERT_93", 2154)];

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }
}

/// Détecte l'EPSG d'un libellé de système source (texte libre).
///
/// Le libellé FINESS ressemble à `1,ATLASANTE,100,IGN,BD_ADRESSE,V2.2,LAMBERT_93` :
/// on cherche le nom de projection comme sous-chaîne.
pub fn detect_epsg(source_system: &str) -> Option<u32> {
    PROJECTIONS
        .iter()
        .find(|(name, _)| source_system.contains(name))
        .map(|&(_, epsg)| epsg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_lambert93() {
        assert_eq!(detect_epsg("LAMBERT_93"), Some(2154));
        assert_eq!(
            detect_epsg("1,ATLASANTE,100,IGN,BD_ADRESSE,V2.2,LAMBERT_93"),
            Some(2154)
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_epsg(""), None);
        assert_eq!(detect_epsg("   "), None);
        assert_eq!(detect_epsg("1,ATLASANTE,100,IGN,BD_ADRESSE,V2.2,UTM_N20"), None);
        // Sensible à la casse, comme le libellé source
        assert_eq!(detect_epsg("lambert_93"), None);
    }

    #[test]
    fn test_geographic_to_degrees() {
        let (lon, lat) = Geographic::new(std::f64::consts::PI, 0.0).to_degrees();
        assert!((lon - 180.0).abs() < 1e-12);
        assert_eq!(lat, 0.0);
    }
}
