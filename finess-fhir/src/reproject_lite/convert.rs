//! Conversion des coordonnées FINESS en longitude/latitude WGS84
//!
//! Politique :
//! - source Lambert 93 : transformation EPSG:2154 → EPSG:4326
//! - sinon (vide, inconnu) : les valeurs brutes sont reprises telles quelles
//!   comme longitude/latitude, avec un warning

use geo::Point;
use thiserror::Error;
use tracing::warn;

use super::{detect_epsg, Lambert93};

/// Coordonnée brute non numérique
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {axis} coordinate: {value:?}")]
pub struct CoordinateError {
    /// Axe concerné (`x` ou `y`)
    pub axis: &'static str,
    /// Valeur brute
    pub value: String,
}

/// Méthode appliquée lors d'une conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Reprojection depuis l'EPSG indiqué
    Projected(u32),
    /// Valeurs reprises telles quelles
    Passthrough,
}

/// Convertit `(x, y)` exprimés dans `source_system` en `Point(longitude, latitude)`.
///
/// Fonction pure : mêmes entrées, même résultat au bit près.
///
/// # Errors
///
/// `CoordinateError` si `x` ou `y` n'est pas un nombre.
pub fn convert(
    x: &str,
    y: &str,
    source_system: &str,
) -> Result<(Point<f64>, Conversion), CoordinateError> {
    let x_value = parse_coordinate("x", x)?;
    let y_value = parse_coordinate("y", y)?;

    match detect_epsg(source_system) {
        Some(epsg @ 2154) => {
            let (lon, lat) = Lambert93::default()
                .to_geographic(x_value, y_value)
                .to_degrees();
            Ok((Point::new(lon, lat), Conversion::Projected(epsg)))
        }
        _ => {
            warn!(source = %source_system, "Unknown coordinate system, using raw values as longitude/latitude");
            Ok((Point::new(x_value, y_value), Conversion::Passthrough))
        }
    }
}

fn parse_coordinate(axis: &'static str, value: &str) -> Result<f64, CoordinateError> {
    fast_float::parse(value.trim()).map_err(|_| CoordinateError {
        axis,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambert93() {
        let (point, conversion) = convert("652381", "6862047", "LAMBERT_93").unwrap();
        assert_eq!(conversion, Conversion::Projected(2154));
        assert!((point.x() - 2.351).abs() < 0.001, "lon={}", point.x());
        assert!((point.y() - 48.857).abs() < 0.001, "lat={}", point.y());
    }

    #[test]
    fn test_deterministic() {
        let first = convert("870215.8", "6571590.2", "LAMBERT_93").unwrap();
        let second = convert("870215.8", "6571590.2", "LAMBERT_93").unwrap();
        assert_eq!(first.0.x().to_bits(), second.0.x().to_bits());
        assert_eq!(first.0.y().to_bits(), second.0.y().to_bits());
    }

    #[test]
    fn test_passthrough_when_unknown_system() {
        let (point, conversion) = convert("-61.0123", "14.6042", "UTM_N20").unwrap();
        assert_eq!(conversion, Conversion::Passthrough);
        assert_eq!(point.x(), -61.0123);
        assert_eq!(point.y(), 14.6042);
    }

    #[test]
    fn test_passthrough_when_blank_system() {
        let (point, conversion) = convert("2.35", "48.85", "").unwrap();
        assert_eq!(conversion, Conversion::Passthrough);
        assert_eq!((point.x(), point.y()), (2.35, 48.85));
    }

    #[test]
    fn test_surrounding_spaces_accepted() {
        let (point, _) = convert(" 2.35 ", "48.85\t", "").unwrap();
        assert_eq!((point.x(), point.y()), (2.35, 48.85));
    }

    #[test]
    fn test_non_numeric() {
        let err = convert("abc", "6862047", "LAMBERT_93").unwrap_err();
        assert_eq!(err.axis, "x");
        assert_eq!(err.value, "abc");

        let err = convert("652381", "", "LAMBERT_93").unwrap_err();
        assert_eq!(err.axis, "y");
    }
}
