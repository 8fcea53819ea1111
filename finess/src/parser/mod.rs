//! Parser pour le fichier FINESS (lignes `structureet` / `geolocalisation`)
//!
//! Le format est un découpage brut sur `;` sans guillemets ni échappement :
//! un `;` présent dans une donnée décale tous les champs suivants de la ligne.
//! Aucune réconciliation n'est tentée.

use memchr::{memchr, memchr_iter};
use tracing::debug;

use crate::types::{EstablishmentRecord, GeoRecord, Registry, ESTABLISHMENT_TAG, GEOLOCATION_TAG};

/// Délimiteur de champs
pub const DELIMITER: u8 = b';';

/// Type d'une ligne, déterminé par son premier champ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Ligne `structureet`
    Establishment,
    /// Ligne `geolocalisation`
    Geolocation,
    /// En-tête, ligne vide ou type inconnu
    Ignored,
}

/// Classe une ligne d'après son discriminant, avant tout découpage
pub fn classify(line: &str) -> LineKind {
    let tag = match memchr(DELIMITER, line.as_bytes()) {
        Some(pos) => &line[..pos],
        None => line,
    };

    match tag {
        ESTABLISHMENT_TAG => LineKind::Establishment,
        GEOLOCATION_TAG => LineKind::Geolocation,
        _ => LineKind::Ignored,
    }
}

/// Découpe une ligne sur le délimiteur (sans allocation des champs)
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(32);
    let mut start = 0;

    // ';' est ASCII : les positions trouvées sont des frontières UTF-8 valides
    for pos in memchr_iter(DELIMITER, line.as_bytes()) {
        fields.push(&line[start..pos]);
        start = pos + 1;
    }
    fields.push(&line[start..]);

    fields
}

/// Parse le contenu décodé d'un fichier FINESS
pub fn parse(content: &str) -> Registry {
    let mut registry = Registry::default();

    // `lines()` retire aussi le '\r' des fins de ligne Windows
    for (number, line) in content.lines().enumerate() {
        match classify(line) {
            LineKind::Establishment => {
                let fields = split_fields(line);
                registry
                    .establishments
                    .push(EstablishmentRecord::from_fields(&fields));
            }
            LineKind::Geolocation => {
                let fields = split_fields(line);
                registry.geolocations.push(GeoRecord::from_fields(&fields));
            }
            LineKind::Ignored => {
                if !line.is_empty() {
                    debug!(line = number + 1, "Ignored line");
                }
                registry.ignored_lines += 1;
            }
        }
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("structureet;010000024;010780054"), LineKind::Establishment);
        assert_eq!(classify("geolocalisation;010000024;870215.8"), LineKind::Geolocation);
        assert_eq!(classify("finess;etalab;100;2024-01-12"), LineKind::Ignored);
        assert_eq!(classify(""), LineKind::Ignored);
    }

    #[test]
    fn test_classify_requires_exact_tag() {
        // Le discriminant est le premier champ entier, pas un préfixe
        assert_eq!(classify("structureetab;010000024"), LineKind::Ignored);
        assert_eq!(classify("structureet"), LineKind::Establishment);
    }

    #[test]
    fn test_split_fields_keeps_empty_fields() {
        assert_eq!(split_fields("a;;b;"), vec!["a", "", "b", ""]);
        assert_eq!(split_fields("seul"), vec!["seul"]);
    }

    #[test]
    fn test_split_fields_non_ascii() {
        assert_eq!(
            split_fields("structureet;CENTRE HOSPITALIER D'ÉVREUX;Évreux"),
            vec!["structureet", "CENTRE HOSPITALIER D'ÉVREUX", "Évreux"]
        );
    }

    #[test]
    fn test_parse_interleaved_records() {
        let content = "finess;etalab;100;2024-01-12\r\n\
                       structureet;010000024;010780054;CH DE FLEYRIAT\r\n\
                       geolocalisation;010000024;870215.8;6571590.2;LAMBERT_93;2023-01-12\r\n\
                       structureet;010000032;010780062;CH DE BELLEY\r\n\
                       autre;ligne\r\n";

        let registry = parse(content);
        assert_eq!(registry.establishments.len(), 2);
        assert_eq!(registry.geolocations.len(), 1);
        assert_eq!(registry.ignored_lines, 2);

        assert_eq!(registry.establishments[0].rs, "CH DE FLEYRIAT");
        assert_eq!(registry.establishments[1].nofinesset, "010000032");
        // Pas de '\r' résiduel dans le dernier champ
        assert_eq!(registry.geolocations[0].datemaj, "2023-01-12");
    }

    #[test]
    fn test_delimiter_in_data_shifts_fields() {
        // Limite connue du format : pas de réalignement
        let registry = parse("structureet;010000024;010780054;CH;DE FLEYRIAT;LONG");
        let record = &registry.establishments[0];
        assert_eq!(record.rs, "CH");
        assert_eq!(record.rslongue, "DE FLEYRIAT");
        assert_eq!(record.complrs, "LONG");
    }
}
