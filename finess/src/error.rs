//! Types d'erreurs pour le crate finess

use thiserror::Error;

/// Erreurs pouvant survenir lors de la lecture du fichier FINESS
#[derive(Debug, Error)]
pub enum FinessError {
    /// Erreur d'I/O lors de la lecture du fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encodage non supporté
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}
