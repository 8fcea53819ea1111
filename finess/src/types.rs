//! Types de données pour le crate finess

/// Discriminant des lignes établissement
pub const ESTABLISHMENT_TAG: &str = "structureet";

/// Discriminant des lignes de géolocalisation
pub const GEOLOCATION_TAG: &str = "geolocalisation";

/// Ordre des champs d'une ligne `structureet`
pub const FINESS_KEYS: [&str; 32] = [
    "structureet",
    "nofinesset",
    "nofinessej",
    "rs",
    "rslongue",
    "complrs",
    "compldistrib",
    "numvoie",
    "typvoie",
    "voie",
    "compvoie",
    "lieuditbp",
    "commune",
    "departement",
    "libdepartement",
    "ligneacheminement",
    "telephone",
    "telecopie",
    "categetab",
    "libcategetab",
    "categagretab",
    "libcategagretab",
    "siret",
    "codeape",
    "codemft",
    "libmft",
    "codesph",
    "libsph",
    "dateouv",
    "dateautor",
    "datemaj",
    "numuai",
];

/// Ordre des champs d'une ligne `geolocalisation`
pub const GEOFINESS_KEYS: [&str; 6] = [
    "geolocalisation",
    "nofinesset",
    "coordxet",
    "coordyet",
    "sourcecoordet",
    "datemaj",
];

/// Résultat du parsing d'un fichier FINESS
#[derive(Debug, Default)]
pub struct Registry {
    /// Lignes établissement, dans l'ordre du fichier
    pub establishments: Vec<EstablishmentRecord>,

    /// Lignes de géolocalisation, dans l'ordre du fichier
    pub geolocations: Vec<GeoRecord>,

    /// Nombre de lignes ignorées (en-tête, types inconnus)
    pub ignored_lines: usize,
}

/// Une ligne `structureet` (entité géographique)
///
/// Tous les champs sont conservés tels quels (texte brut, non trimé).
/// Une chaîne vide signifie "valeur absente".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstablishmentRecord {
    /// Discriminant de la ligne (`structureet`)
    pub structureet: String,
    /// N° FINESS de l'entité géographique
    pub nofinesset: String,
    /// N° FINESS de l'entité juridique
    pub nofinessej: String,
    /// Raison sociale
    pub rs: String,
    /// Raison sociale longue
    pub rslongue: String,
    /// Complément de raison sociale
    pub complrs: String,
    /// Complément de distribution
    pub compldistrib: String,
    /// Numéro de voie
    pub numvoie: String,
    /// Type de voie
    pub typvoie: String,
    /// Libellé de voie
    pub voie: String,
    /// Complément de voie (bis, ter...)
    pub compvoie: String,
    /// Lieu-dit / boîte postale
    pub lieuditbp: String,
    /// Code commune
    pub commune: String,
    /// Code département
    pub departement: String,
    /// Libellé département
    pub libdepartement: String,
    /// Ligne d'acheminement (code postal + ville)
    pub ligneacheminement: String,
    pub telephone: String,
    pub telecopie: String,
    /// Catégorie d'établissement
    pub categetab: String,
    pub libcategetab: String,
    /// Catégorie d'agrégat d'établissement
    pub categagretab: String,
    pub libcategagretab: String,
    /// N° SIRET
    pub siret: String,
    /// Code APE (NAF rév. 2)
    pub codeape: String,
    /// Mode de fixation des tarifs
    pub codemft: String,
    pub libmft: String,
    /// Statut PSPH / secteur
    pub codesph: String,
    pub libsph: String,
    /// Date d'ouverture (AAAA-MM-JJ)
    pub dateouv: String,
    /// Date d'autorisation
    pub dateautor: String,
    /// Date de mise à jour
    pub datemaj: String,
    /// N° UAI
    pub numuai: String,
}

impl EstablishmentRecord {
    /// Construit un enregistrement depuis les champs découpés, par position
    /// dans [`FINESS_KEYS`].
    ///
    /// Les champs manquants en fin de ligne valent `""`, les champs
    /// surnuméraires sont ignorés.
    pub fn from_fields(fields: &[&str]) -> Self {
        let mut record = Self::default();
        for (key, value) in FINESS_KEYS.iter().zip(fields) {
            if let Some(slot) = record.field_mut(key) {
                *slot = (*value).to_string();
            }
        }
        record
    }

    /// Champ correspondant à une clé FINESS
    pub fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let slot = match key {
            "structureet" => &mut self.structureet,
            "nofinesset" => &mut self.nofinesset,
            "nofinessej" => &mut self.nofinessej,
            "rs" => &mut self.rs,
            "rslongue" => &mut self.rslongue,
            "complrs" => &mut self.complrs,
            "compldistrib" => &mut self.compldistrib,
            "numvoie" => &mut self.numvoie,
            "typvoie" => &mut self.typvoie,
            "voie" => &mut self.voie,
            "compvoie" => &mut self.compvoie,
            "lieuditbp" => &mut self.lieuditbp,
            "commune" => &mut self.commune,
            "departement" => &mut self.departement,
            "libdepartement" => &mut self.libdepartement,
            "ligneacheminement" => &mut self.ligneacheminement,
            "telephone" => &mut self.telephone,
            "telecopie" => &mut self.telecopie,
            "categetab" => &mut self.categetab,
            "libcategetab" => &mut self.libcategetab,
            "categagretab" => &mut self.categagretab,
            "libcategagretab" => &mut self.libcategagretab,
            "siret" => &mut self.siret,
            "codeape" => &mut self.codeape,
            "codemft" => &mut self.codemft,
            "libmft" => &mut self.libmft,
            "codesph" => &mut self.codesph,
            "libsph" => &mut self.libsph,
            "dateouv" => &mut self.dateouv,
            "dateautor" => &mut self.dateautor,
            "datemaj" => &mut self.datemaj,
            "numuai" => &mut self.numuai,
            _ => return None,
        };
        Some(slot)
    }
}

/// Une ligne `geolocalisation`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoRecord {
    /// N° FINESS de l'entité géographique (clé de jointure)
    pub nofinesset: String,
    /// Coordonnée X brute
    pub coordxet: String,
    /// Coordonnée Y brute
    pub coordyet: String,
    /// Système de référence source (texte libre, ex: `...,LAMBERT_93`)
    pub sourcecoordet: String,
    /// Date de mise à jour
    pub datemaj: String,
}

impl GeoRecord {
    /// Construit un enregistrement depuis les champs découpés, par position
    /// dans [`GEOFINESS_KEYS`]
    pub fn from_fields(fields: &[&str]) -> Self {
        let mut record = Self::default();
        for (key, value) in GEOFINESS_KEYS.iter().zip(fields) {
            if let Some(slot) = record.field_mut(key) {
                *slot = (*value).to_string();
            }
        }
        record
    }

    /// Champ correspondant à une clé de géolocalisation (le discriminant n'est pas conservé)
    pub fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let slot = match key {
            "nofinesset" => &mut self.nofinesset,
            "coordxet" => &mut self.coordxet,
            "coordyet" => &mut self.coordyet,
            "sourcecoordet" => &mut self.sourcecoordet,
            "datemaj" => &mut self.datemaj,
            _ => return None,
        };
        Some(slot)
    }
}
