//! Index des géolocalisations par N° FINESS d'entité géographique

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::types::GeoRecord;

/// Coordonnées brutes d'un établissement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoEntry {
    /// Coordonnée X brute
    pub coordxet: String,
    /// Coordonnée Y brute
    pub coordyet: String,
    /// Système de référence source
    pub sourcecoordet: String,
}

/// Table `nofinesset` → coordonnées, construite une seule fois puis en lecture seule
#[derive(Debug, Default)]
pub struct GeoIndex {
    entries: HashMap<String, GeoEntry>,
    duplicates: usize,
}

impl GeoIndex {
    /// Construit l'index. En cas de clé dupliquée, la dernière ligne l'emporte.
    pub fn build(records: &[GeoRecord]) -> Self {
        let mut entries = HashMap::with_capacity(records.len());
        let mut duplicates = 0;

        for record in records {
            let key = record.nofinesset.trim().to_string();
            let entry = GeoEntry {
                coordxet: record.coordxet.clone(),
                coordyet: record.coordyet.clone(),
                sourcecoordet: record.sourcecoordet.clone(),
            };

            if entries.insert(key, entry).is_some() {
                debug!(nofinesset = %record.nofinesset, "Duplicate geolocation, keeping last");
                duplicates += 1;
            }
        }

        Self {
            entries,
            duplicates,
        }
    }

    /// Cherche les coordonnées d'un établissement.
    ///
    /// `None` signifie simplement que l'établissement n'est pas (encore) géolocalisé.
    pub fn get(&self, nofinesset: &str) -> Option<&GeoEntry> {
        self.entries.get(nofinesset.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nombre de clés écrasées pendant la construction
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Répartition des entrées par système de référence source
    pub fn source_systems(&self) -> BTreeMap<String, usize> {
        let mut systems = BTreeMap::new();
        for entry in self.entries.values() {
            let label = match entry.sourcecoordet.trim() {
                "" => "(vide)".to_string(),
                label => label.to_string(),
            };
            *systems.entry(label).or_insert(0) += 1;
        }
        systems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo(nofinesset: &str, x: &str, y: &str) -> GeoRecord {
        GeoRecord {
            nofinesset: nofinesset.to_string(),
            coordxet: x.to_string(),
            coordyet: y.to_string(),
            sourcecoordet: "LAMBERT_93".to_string(),
            datemaj: "2023-01-12".to_string(),
        }
    }

    #[test]
    fn test_lookup() {
        let index = GeoIndex::build(&[geo("010000024", "870215.8", "6571590.2")]);
        let entry = index.get("010000024").unwrap();
        assert_eq!(entry.coordxet, "870215.8");
        assert_eq!(entry.coordyet, "6571590.2");
        assert!(index.get("999999999").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let index = GeoIndex::build(&[
            geo("010000024", "1.0", "2.0"),
            geo("010000024", "3.0", "4.0"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates(), 1);
        assert_eq!(index.get("010000024").unwrap().coordxet, "3.0");
    }

    #[test]
    fn test_lookup_ignores_surrounding_spaces() {
        let index = GeoIndex::build(&[geo(" 010000024", "1.0", "2.0")]);
        assert!(index.get("010000024 ").is_some());
    }

    #[test]
    fn test_source_systems() {
        let mut blank = geo("2", "1.0", "2.0");
        blank.sourcecoordet = String::new();
        let index = GeoIndex::build(&[geo("1", "1.0", "2.0"), blank]);

        let systems = index.source_systems();
        assert_eq!(systems.get("LAMBERT_93"), Some(&1));
        assert_eq!(systems.get("(vide)"), Some(&1));
    }
}
