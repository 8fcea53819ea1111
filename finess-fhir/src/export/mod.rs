//! Modules d'export (NDJSON, génération par tranche)

pub mod generator;
pub mod ndjson;

pub use generator::{GenerateError, Generator};
pub use ndjson::NdjsonWriter;
