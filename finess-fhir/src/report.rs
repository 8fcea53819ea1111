//! Rapport de génération
//!
//! Collecte les compteurs et les incidents par établissement pendant la
//! génération, puis les affiche ou les sauvegarde en JSON.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::reproject_lite::Conversion;

/// Nombre maximum d'incidents conservés dans le rapport
const MAX_ISSUES: usize = 1000;

/// Statut global de la génération
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Toutes les ressources attendues ont été écrites
    Success,
    /// Des Locations ont été écartées
    PartialSuccess,
    /// Arrêt sur une Organization invalide
    Failed,
}

/// Niveau de sévérité des incidents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorLevel {
    /// Erreur fatale: génération interrompue
    Fatal,
    /// Erreur: ressource écartée
    Error,
}

/// Incident rattaché à un établissement
#[derive(Debug, Clone, Serialize)]
pub struct RecordIssue {
    pub level: ErrorLevel,
    /// Id de la ressource concernée
    pub resource_id: String,
    pub message: String,
    /// Détails (valeurs brutes, diagnostic de validation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Rapport complet d'une génération
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Fichier FINESS source
    pub source: String,
    /// Checksum blake3 du fichier source
    pub source_checksum: String,
    /// Fichier NDJSON produit
    pub output: String,
    /// Bornes effectives de la tranche
    pub start: usize,
    pub end: usize,
    pub duration_secs: f64,
    pub status: RunStatus,

    pub establishments_processed: usize,
    pub organizations_written: usize,
    pub locations_written: usize,
    /// Établissements sans géolocalisation
    pub locations_not_geolocated: usize,
    /// Coordonnées non numériques
    pub locations_invalid_coordinates: usize,
    /// Locations refusées par la validation
    pub locations_rejected: usize,
    /// Positions reprises sans reprojection (système source inconnu)
    pub passthrough_conversions: usize,

    pub issues: Vec<RecordIssue>,
    /// Incidents non conservés au-delà de `MAX_ISSUES`
    pub issues_truncated: usize,
}

impl GenerationReport {
    pub fn new(source: &Path, output: &Path, start: usize, end: usize) -> Self {
        Self {
            source: source.display().to_string(),
            source_checksum: String::new(),
            output: output.display().to_string(),
            start,
            end,
            duration_secs: 0.0,
            status: RunStatus::Success,
            establishments_processed: 0,
            organizations_written: 0,
            locations_written: 0,
            locations_not_geolocated: 0,
            locations_invalid_coordinates: 0,
            locations_rejected: 0,
            passthrough_conversions: 0,
            issues: Vec::new(),
            issues_truncated: 0,
        }
    }

    /// Enregistre une Organization écrite
    pub fn record_organization(&mut self) {
        self.establishments_processed += 1;
        self.organizations_written += 1;
    }

    /// Enregistre une Location écrite
    pub fn record_location(&mut self, conversion: Conversion) {
        self.locations_written += 1;
        if conversion == Conversion::Passthrough {
            self.passthrough_conversions += 1;
        }
    }

    pub fn record_not_geolocated(&mut self) {
        self.locations_not_geolocated += 1;
    }

    pub fn record_invalid_coordinates(&mut self, resource_id: &str, details: String) {
        self.locations_invalid_coordinates += 1;
        self.push_issue(RecordIssue {
            level: ErrorLevel::Error,
            resource_id: resource_id.to_string(),
            message: "Invalid coordinates, location skipped".to_string(),
            details: Some(details),
        });
    }

    pub fn record_rejected_location(&mut self, resource_id: &str, details: String) {
        self.locations_rejected += 1;
        self.push_issue(RecordIssue {
            level: ErrorLevel::Error,
            resource_id: resource_id.to_string(),
            message: "Location rejected by validation".to_string(),
            details: Some(details),
        });
    }

    /// Enregistre l'Organization invalide qui interrompt la génération
    pub fn record_fatal(&mut self, resource_id: &str, details: String) {
        self.establishments_processed += 1;
        self.push_issue(RecordIssue {
            level: ErrorLevel::Fatal,
            resource_id: resource_id.to_string(),
            message: "Organization rejected by validation".to_string(),
            details: Some(details),
        });
    }

    fn push_issue(&mut self, issue: RecordIssue) {
        // Le fatal est toujours conservé
        if self.issues.len() < MAX_ISSUES || issue.level == ErrorLevel::Fatal {
            self.issues.push(issue);
        } else {
            self.issues_truncated += 1;
        }
    }

    /// Calcule le checksum du fichier source
    pub fn set_source_checksum(&mut self, path: &Path) -> Result<()> {
        self.source_checksum = compute_file_checksum(path)?;
        Ok(())
    }

    /// Définit la durée de la génération
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        let has_fatal = self.issues.iter().any(|i| i.level == ErrorLevel::Fatal);
        let has_errors = self.locations_invalid_coordinates + self.locations_rejected > 0;

        self.status = if has_fatal {
            RunStatus::Failed
        } else if has_errors {
            RunStatus::PartialSuccess
        } else {
            RunStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("GENERATION REPORT - {} [{}..{}]", self.source, self.start, self.end);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!("Output: {}", self.output);
        if !self.source_checksum.is_empty() {
            println!("Source blake3: {}", self.source_checksum);
        }

        println!("\n--- SUMMARY ---");
        println!("Establishments: {}", self.establishments_processed);
        println!("Organizations: {} written", self.organizations_written);
        println!(
            "Locations: {} written ({} without reprojection), {} not geolocated, {} invalid coordinates, {} rejected",
            self.locations_written,
            self.passthrough_conversions,
            self.locations_not_geolocated,
            self.locations_invalid_coordinates,
            self.locations_rejected
        );

        if !self.issues.is_empty() {
            println!("\n--- ISSUES ({}) ---", self.issues.len() + self.issues_truncated);
            for issue in self.issues.iter().take(20) {
                println!("  {:?} [{}] {}", issue.level, issue.resource_id, issue.message);
            }
            let hidden = self.issues.len().saturating_sub(20) + self.issues_truncated;
            if hidden > 0 {
                println!("  ... and {} more", hidden);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Cannot write report {}", path.display()))?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "[{}..{}]: {} organizations, {} locations, {} issues",
            self.start,
            self.end,
            self.organizations_written,
            self.locations_written,
            self.issues.len() + self.issues_truncated
        )
    }
}

/// Calcule le checksum blake3 d'un fichier
fn compute_file_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 65536]; // 64KB buffer

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> GenerationReport {
        GenerationReport::new(Path::new("finess.csv"), Path::new("out/etab0-10.ndjson"), 0, 10)
    }

    #[test]
    fn test_counters() {
        let mut report = report();
        report.record_organization();
        report.record_location(Conversion::Projected(2154));
        report.record_organization();
        report.record_location(Conversion::Passthrough);
        report.record_organization();
        report.record_not_geolocated();

        assert_eq!(report.establishments_processed, 3);
        assert_eq!(report.organizations_written, 3);
        assert_eq!(report.locations_written, 2);
        assert_eq!(report.passthrough_conversions, 1);
        assert_eq!(report.locations_not_geolocated, 1);
    }

    #[test]
    fn test_finalize_success() {
        let mut report = report();
        report.record_organization();
        report.record_not_geolocated();
        report.finalize();
        assert_eq!(report.status, RunStatus::Success);
    }

    #[test]
    fn test_finalize_partial_success() {
        let mut report = report();
        report.record_organization();
        report.record_invalid_coordinates("a-b", "x=\"N/A\"".to_string());
        report.finalize();
        assert_eq!(report.status, RunStatus::PartialSuccess);
        assert_eq!(report.issues[0].resource_id, "a-b");
    }

    #[test]
    fn test_finalize_failed() {
        let mut report = report();
        report.record_fatal("a-b", "name: empty string".to_string());
        report.finalize();
        assert_eq!(report.status, RunStatus::Failed);
    }

    #[test]
    fn test_issues_are_capped() {
        let mut report = report();
        for i in 0..MAX_ISSUES + 5 {
            report.record_rejected_location(&format!("id-{i}"), String::new());
        }
        report.record_fatal("last", String::new());

        assert_eq!(report.issues.len(), MAX_ISSUES + 1);
        assert_eq!(report.issues_truncated, 5);
        assert_eq!(report.issues.last().unwrap().level, ErrorLevel::Fatal);
    }

    #[test]
    fn test_checksum_and_save() {
        let dir = std::env::temp_dir();
        let source = dir.join("finess_report_source.csv");
        std::fs::write(&source, b"structureet;1;2\n").unwrap();

        let mut report = report();
        report.set_source_checksum(&source).unwrap();
        assert_eq!(report.source_checksum.len(), 64);

        let saved = dir.join("finess_report.json");
        report.save_to_file(&saved).unwrap();
        let content = std::fs::read_to_string(&saved).unwrap();
        assert!(content.contains("\"source_checksum\""));

        std::fs::remove_file(source).ok();
        std::fs::remove_file(saved).ok();
    }

    #[test]
    fn test_summary() {
        let mut report = report();
        report.record_organization();
        assert!(report.summary().contains("1 organizations"));
    }
}
