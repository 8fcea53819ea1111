//! Définitions des ellipsoïdes

/// Ellipsoïde GRS80 (utilisé par Lambert 93 / RGF93)
/// Note: Quasi identique à WGS84, différence < 0.1mm
pub struct GRS80;

impl GRS80 {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub const A: f64 = 6378137.0;

    /// Aplatissement
    pub const F: f64 = 1.0 / 298.257222101;

    /// Première excentricité au carré
    pub const E2: f64 = 2.0 * Self::F - Self::F * Self::F;

    /// Première excentricité
    pub const E: f64 = 0.0818191910428158; // sqrt(E2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excentricity_consistent() {
        assert!((GRS80::E * GRS80::E - GRS80::E2).abs() < 1e-15);
    }
}
