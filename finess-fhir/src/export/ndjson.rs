//! Écriture NDJSON : une ressource validée par ligne

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::fhir::{Validate, Validated};

/// Écrivain NDJSON, seul propriétaire du flux de sortie
pub struct NdjsonWriter<W: Write> {
    writer: W,
    lines: usize,
}

impl NdjsonWriter<BufWriter<File>> {
    /// Crée (ou écrase) le fichier de sortie
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Écrit une ressource validée suivie d'un saut de ligne
    pub fn write<R: Validate + Serialize>(&mut self, resource: &Validated<R>) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, resource.inner())?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Nombre de lignes écrites
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
