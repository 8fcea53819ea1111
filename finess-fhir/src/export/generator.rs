//! Génération NDJSON d'une tranche d'établissements
//!
//! Parcours séquentiel, dans l'ordre du fichier : pour chaque établissement,
//! mapping → validation → écriture de l'Organization puis, si elle existe,
//! de la Location. Une Organization invalide arrête toute la génération ;
//! une Location invalide est seulement écartée.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use finess::{EstablishmentRecord, GeoIndex, Registry};
use thiserror::Error;
use tracing::{debug, error, info};

use super::ndjson::NdjsonWriter;
use crate::config::Config;
use crate::fhir::{Organization, Validated, ValidationError};
use crate::mapping::{self, LocationOutcome};
use crate::report::GenerationReport;

/// Fréquence des logs de progression
const PROGRESS_EVERY: usize = 10_000;

/// Erreurs qui interrompent une génération
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Organization non conforme : bug de mapping, arrêt immédiat
    #[error("Invalid Organization {id}: {source}")]
    InvalidOrganization {
        id: String,
        #[source]
        source: ValidationError,
    },

    /// Erreur d'écriture de la sortie
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Générateur : registre parsé + index de géolocalisation, en lecture seule
pub struct Generator {
    source: PathBuf,
    config: Config,
    establishments: Vec<EstablishmentRecord>,
    geo_index: GeoIndex,
}

impl Generator {
    /// Charge le fichier FINESS et construit l'index de géolocalisation
    pub fn load(path: &Path, config: Config) -> Result<Self> {
        let encoding = config.source_encoding()?;
        let registry = finess::parse(path, encoding)
            .with_context(|| format!("Failed to load FINESS file {}", path.display()))?;

        Ok(Self::from_registry(registry, config, path))
    }

    pub fn from_registry(registry: Registry, config: Config, source: &Path) -> Self {
        let geo_index = GeoIndex::build(&registry.geolocations);

        info!(
            finess = registry.establishments.len(),
            geo = geo_index.len(),
            duplicates = geo_index.duplicates(),
            "Geo index built"
        );

        Self {
            source: source.to_path_buf(),
            config,
            establishments: registry.establishments,
            geo_index,
        }
    }

    pub fn establishments(&self) -> &[EstablishmentRecord] {
        &self.establishments
    }

    pub fn geo_index(&self) -> &GeoIndex {
        &self.geo_index
    }

    /// Bornes effectives : `start` vaut 0 et `end` le nombre d'établissements par défaut
    pub fn bounds(&self, start: Option<usize>, end: Option<usize>) -> (usize, usize) {
        (start.unwrap_or(0), end.unwrap_or(self.establishments.len()))
    }

    /// Nom du fichier de sortie d'une tranche
    pub fn output_path(output_dir: &Path, start: usize, end: usize) -> PathBuf {
        output_dir.join(format!("etab{start}-{end}.ndjson"))
    }

    /// Génère le fichier `etab{start}-{end}.ndjson` dans `output_dir`
    ///
    /// Le rapport est toujours rendu, finalisé, avec l'issue de la génération :
    /// `GenerateError::InvalidOrganization` (fatal) si une Organization ne passe
    /// pas la validation. Les lignes déjà écrites sont alors conservées et le
    /// rapport est au statut `Failed`.
    ///
    /// # Errors
    ///
    /// Erreur d'entrée/sortie avant le début de l'écriture (répertoire ou
    /// fichier de sortie impossible à créer).
    pub fn generate(
        &self,
        output_dir: &Path,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Result<(GenerationReport, Result<(), GenerateError>)> {
        let started_at = Instant::now();
        let (start, end) = self.bounds(start, end);

        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Cannot create {}", output_dir.display()))?;
        let output = Self::output_path(output_dir, start, end);

        info!(
            output = %output.display(),
            start,
            end,
            total = self.establishments.len(),
            "Generate records"
        );

        let mut report = GenerationReport::new(&self.source, &output, start, end);
        if let Err(e) = report.set_source_checksum(&self.source) {
            debug!("Source checksum unavailable: {:#}", e);
        }

        let mut writer = NdjsonWriter::create(&output)
            .with_context(|| format!("Cannot create {}", output.display()))?;
        let outcome = self.generate_to(&mut writer, start, end, &mut report);

        report.set_duration(started_at.elapsed());
        report.finalize();

        info!(lines = writer.lines(), status = ?report.status, "{}", report.summary());
        Ok((report, outcome))
    }

    /// Génère la tranche `[start, end)` (bornée au nombre d'établissements) dans `writer`
    pub fn generate_to<W: Write>(
        &self,
        writer: &mut NdjsonWriter<W>,
        start: usize,
        end: usize,
        report: &mut GenerationReport,
    ) -> Result<(), GenerateError> {
        let end = end.min(self.establishments.len());
        let start = start.min(end);

        for (i, record) in self.establishments[start..end].iter().enumerate() {
            let result = self.process(record, writer, report);
            if result.is_err() {
                // Les lignes déjà produites restent sur disque
                writer.flush()?;
            }
            result?;

            if (i + 1) % PROGRESS_EVERY == 0 {
                info!(done = i + 1, remaining = end - start - i - 1, "Progress");
            }
        }

        writer.flush()?;
        Ok(())
    }

    fn process<W: Write>(
        &self,
        record: &EstablishmentRecord,
        writer: &mut NdjsonWriter<W>,
        report: &mut GenerationReport,
    ) -> Result<(), GenerateError> {
        let geo = self.geo_index.get(&record.nofinesset);
        let resources = mapping::build(record, geo, &self.config);

        debug!(id = %resources.organization.id, rs = %record.rs, "Etab geo");

        let organization = match Validated::new(resources.organization) {
            Ok(organization) => organization,
            Err(rejected) => {
                let id = rejected.resource.id.clone();
                error!("Error in data -> FHIR");
                error!("{}", pretty_payload(&rejected.resource));
                error!("{}", rejected.error);
                report.record_fatal(&id, rejected.error.to_string());
                return Err(GenerateError::InvalidOrganization {
                    id,
                    source: rejected.error,
                });
            }
        };

        writer.write(&organization)?;
        report.record_organization();

        match resources.location {
            LocationOutcome::NotGeolocated => {
                debug!(nofinesset = %record.nofinesset, "No geolocation");
                report.record_not_geolocated();
            }
            LocationOutcome::InvalidCoordinates(e) => {
                let (x, y) = geo
                    .map(|g| (g.coordxet.as_str(), g.coordyet.as_str()))
                    .unwrap_or_default();
                error!(
                    "Error geo data {}|{}|{}| {}",
                    record.nofinesset, x, y, e
                );
                report.record_invalid_coordinates(
                    &organization.inner().id,
                    format!("{}|{}|{}|: {}", record.nofinesset, x, y, e),
                );
            }
            LocationOutcome::Located {
                location,
                conversion,
            } => match Validated::new(location) {
                Ok(location) => {
                    writer.write(&location)?;
                    report.record_location(conversion);
                }
                Err(rejected) => {
                    error!(id = %rejected.resource.id, "{}", rejected.error);
                    report.record_rejected_location(
                        &rejected.resource.id,
                        rejected.error.to_string(),
                    );
                }
            },
        }

        Ok(())
    }
}

/// Payload JSON indenté, pour le diagnostic
fn pretty_payload(organization: &Organization) -> String {
    serde_json::to_string_pretty(organization)
        .unwrap_or_else(|e| format!("{organization:?} (serialization failed: {e})"))
}
