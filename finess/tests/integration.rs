//! Tests d'intégration sur un fichier FINESS synthétique (ISO-8859-1)

use finess::{GeoIndex, SourceEncoding};

/// Deux établissements, une géolocalisation, en-tête etalab.
/// Les accents sont encodés en ISO-8859-1 (0xC9 = 'É', 0xE9 = 'é').
fn sample_latin1() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"finess;etalab;100;2024-01-12\r\n");
    data.extend_from_slice(
        b"structureet;010000024;010780054;CH DE FLEYRIAT;CENTRE HOSPITALIER DE BOURG-EN-BRESSE FLEYRIAT;;;900;R;DES \xc9COLES;;BP 401;053;01;AIN;01012 BOURG EN BRESSE CEDEX;0474454647;0474454114;355;Centre Hospitalier (C.H.);1102;Centres Hospitaliers;26010004500012;8610Z;03;ARS / DG EPS - Dotation globale;1;\xc9tablissement public de sant\xe9;1979-02-13;1979-02-13;2020-02-04;\r\n",
    );
    data.extend_from_slice(
        b"structureet;010000032;010780062;CH DE BELLEY;;;;52;R;GEORGES GIRERD;;;034;01;AIN;01300 BELLEY;0479426060;;355;Centre Hospitalier (C.H.);1102;Centres Hospitaliers;;8610Z;03;;1;;1979-02-13;1979-02-13;2020-02-04;\r\n",
    );
    data.extend_from_slice(
        b"geolocalisation;010000024;870215.8;6571590.2;1,ATLASANTE,100,IGN,BD_ADRESSE,V2.2,LAMBERT_93;2023-01-12\r\n",
    );
    data
}

#[test]
fn test_parse_latin1_file() {
    let path = std::env::temp_dir().join("finess_integration_latin1.csv");
    std::fs::write(&path, sample_latin1()).unwrap();

    let registry = finess::parse(&path, SourceEncoding::default()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(registry.establishments.len(), 2);
    assert_eq!(registry.geolocations.len(), 1);
    assert_eq!(registry.ignored_lines, 1);

    let fleyriat = &registry.establishments[0];
    assert_eq!(fleyriat.nofinesset, "010000024");
    assert_eq!(fleyriat.nofinessej, "010780054");
    assert_eq!(fleyriat.voie, "DES ÉCOLES");
    assert_eq!(fleyriat.ligneacheminement, "01012 BOURG EN BRESSE CEDEX");
    assert_eq!(fleyriat.libsph, "Établissement public de santé");
    assert_eq!(fleyriat.siret, "26010004500012");
    assert_eq!(fleyriat.datemaj, "2020-02-04");

    let belley = &registry.establishments[1];
    assert_eq!(belley.siret, "");
    assert_eq!(belley.telecopie, "");
}

#[test]
fn test_join_with_geo_index() {
    let registry = finess::parse_bytes(&sample_latin1(), SourceEncoding::Auto);
    let index = GeoIndex::build(&registry.geolocations);

    let located: Vec<_> = registry
        .establishments
        .iter()
        .filter(|e| index.get(&e.nofinesset).is_some())
        .map(|e| e.nofinesset.as_str())
        .collect();

    assert_eq!(located, vec!["010000024"]);
}

#[test]
fn test_missing_file() {
    let result = finess::parse(
        std::path::Path::new("/nonexistent/finess.csv"),
        SourceEncoding::default(),
    );
    assert!(matches!(result, Err(finess::FinessError::Io(_))));
}
