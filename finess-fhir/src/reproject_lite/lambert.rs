//! Projection Lambert 93 (EPSG:2154)
//!
//! Lambert Conformal Conic avec 2 parallèles standards, ellipsoïde GRS80.
//! Seule la transformation inverse (plan → géographique) est nécessaire ici.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::ellipsoid::GRS80;
use super::Geographic;

/// Paramètres Lambert 93 et constantes dérivées de la projection
pub struct Lambert93 {
    /// Longitude origine (3°E)
    lon0: f64,
    /// False easting
    x0: f64,
    /// False northing
    y0: f64,
    /// Exposant de la projection
    n: f64,
    /// Constante C
    c: f64,
    /// Rayon à la latitude origine
    r0: f64,
}

impl Default for Lambert93 {
    fn default() -> Self {
        let lat0 = 46.5_f64.to_radians();
        let lat1 = 44.0_f64.to_radians();
        let lat2 = 49.0_f64.to_radians();

        let n1 = grande_normale(lat1);
        let n2 = grande_normale(lat2);
        let iso_lat1 = isometric_latitude(lat1);
        let iso_lat2 = isometric_latitude(lat2);

        let n = ((n1 * lat1.cos()).ln() - (n2 * lat2.cos()).ln()) / (iso_lat2 - iso_lat1);
        let c = (n1 * lat1.cos() / n) * (n * iso_lat1).exp();
        let r0 = c * (-n * isometric_latitude(lat0)).exp();

        Self {
            lon0: 3.0_f64.to_radians(),
            x0: 700000.0,
            y0: 6600000.0,
            n,
            c,
            r0,
        }
    }
}

impl Lambert93 {
    /// Convertit des coordonnées Lambert 93 (mètres) en géographique RGF93/WGS84
    pub fn to_geographic(&self, x: f64, y: f64) -> Geographic {
        let dx = x - self.x0;
        let dy = self.r0 - (y - self.y0);

        let r = dx.hypot(dy).copysign(self.n);
        let gamma = (dx / dy).atan();

        let iso_lat = -(r / self.c).ln() / self.n;

        Geographic::new(
            self.lon0 + gamma / self.n,
            latitude_from_isometric(iso_lat),
        )
    }
}

/// Calcule la latitude isométrique
fn isometric_latitude(lat: f64) -> f64 {
    let e = GRS80::E;
    let sin_lat = lat.sin();
    let term = ((1.0 - e * sin_lat) / (1.0 + e * sin_lat)).powf(e / 2.0);
    ((FRAC_PI_4 + lat / 2.0).tan() * term).ln()
}

/// Calcule la latitude depuis la latitude isométrique (itératif)
fn latitude_from_isometric(iso_lat: f64) -> f64 {
    let e = GRS80::E;
    let mut lat = 2.0 * iso_lat.exp().atan() - FRAC_PI_2;

    for _ in 0..10 {
        let sin_lat = lat.sin();
        let term = ((1.0 + e * sin_lat) / (1.0 - e * sin_lat)).powf(e / 2.0);
        let new_lat = 2.0 * (iso_lat.exp() * term).atan() - FRAC_PI_2;

        if (new_lat - lat).abs() < 1e-12 {
            return new_lat;
        }
        lat = new_lat;
    }
    lat
}

/// Grande normale (rayon de courbure dans le premier vertical)
fn grande_normale(lat: f64) -> f64 {
    GRS80::A / (1.0 - GRS80::E2 * lat.sin().powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let (lon, lat) = Lambert93::default().to_geographic(700000.0, 6600000.0).to_degrees();
        assert!((lon - 3.0).abs() < 1e-9, "lon={}", lon);
        assert!((lat - 46.5).abs() < 1e-9, "lat={}", lat);
    }

    #[test]
    fn test_paris() {
        // Notre-Dame de Paris approximativement
        let (lon, lat) = Lambert93::default().to_geographic(652381.0, 6862047.0).to_degrees();

        // 2.351°E, 48.857°N
        assert!((lon - 2.351).abs() < 0.001, "lon={}", lon);
        assert!((lat - 48.857).abs() < 0.001, "lat={}", lat);
    }

    #[test]
    fn test_marseille() {
        // Vieux-Port approximativement
        let (lon, lat) = Lambert93::default().to_geographic(893193.0, 6245829.0).to_degrees();

        // Marseille: 5.37°E, 43.29°N
        assert!((lon - 5.379).abs() < 0.01, "lon={}", lon);
        assert!((lat - 43.285).abs() < 0.01, "lat={}", lat);
    }

    #[test]
    fn test_west_of_meridian() {
        // Brest: x < x0 donne une longitude < 3°E
        let (lon, lat) = Lambert93::default().to_geographic(145000.0, 6836000.0).to_degrees();
        assert!(lon < -4.0 && lon > -5.0, "lon={}", lon);
        assert!(lat > 48.0 && lat < 49.0, "lat={}", lat);
    }
}
