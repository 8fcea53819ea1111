//! Configuration du système

use std::path::Path;

use anyhow::{Context, Result};
use finess::{SourceEncoding, DEFAULT_ENCODING};
use serde::{Deserialize, Serialize};

/// Variante des règles de mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingProfile {
    /// Codings catégorie et agrégat toujours présents
    Standard,
    /// Chaque coding n'est ajouté que si son code est renseigné
    #[default]
    Extended,
}

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Variante des règles de mapping
    #[serde(default)]
    pub profile: MappingProfile,

    /// Encodage du fichier source (`iso-8859-1`, `utf-8`, `auto`...)
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Pays des adresses
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_country() -> String {
    "France".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: MappingProfile::default(),
            encoding: default_encoding(),
            country: default_country(),
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "standard" => Self::load_embedded(include_str!("presets/standard.json")),
            "extended" => Self::load_embedded(include_str!("presets/extended.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: standard, extended", preset),
        }
    }

    /// Preset embarqué si le nom est connu, sinon chemin vers un fichier JSON
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        match name_or_path {
            "standard" | "extended" => Self::from_preset(name_or_path),
            path => Self::load(Path::new(path)),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Stratégie de décodage du fichier source
    pub fn source_encoding(&self) -> Result<SourceEncoding> {
        SourceEncoding::from_label(&self.encoding)
            .context(format!("Invalid encoding in config: {}", self.encoding))
    }
}
