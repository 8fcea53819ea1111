//! Décodage du fichier source (encodage mono-octet historique)

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::FinessError;

/// Libellé d'encodage par défaut des extractions etalab
pub const DEFAULT_ENCODING: &str = "iso-8859-1";

/// Libellés décodés en ISO-8859-1 strict (octet = point de code)
const LATIN1_LABELS: &[&str] = &["iso-8859-1", "iso8859-1", "iso_8859-1", "latin1", "l1"];

/// Stratégie de décodage
#[derive(Debug, Clone, Copy)]
pub enum SourceEncoding {
    /// ISO-8859-1 strict : 0x80-0x9F restent des caractères de contrôle
    /// (U+0080-U+009F), contrairement à windows-1252
    Latin1,
    /// Encodage imposé, résolu selon WHATWG (`windows-1252`, `utf-8`...)
    Fixed(&'static Encoding),
    /// UTF-8 si le contenu est valide, sinon ISO-8859-1
    Auto,
}

impl SourceEncoding {
    /// Résout un libellé (`iso-8859-1`, `utf-8`, `auto`...)
    pub fn from_label(label: &str) -> Result<Self, FinessError> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        // WHATWG résout ces libellés en windows-1252
        if LATIN1_LABELS.iter().any(|l| label.eq_ignore_ascii_case(l)) {
            return Ok(Self::Latin1);
        }

        Encoding::for_label(label.as_bytes())
            .map(Self::Fixed)
            .ok_or_else(|| FinessError::UnsupportedEncoding(label.to_string()))
    }

    /// Nom de l'encodage, pour les logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Fixed(encoding) => encoding.name(),
            Self::Auto => "auto",
        }
    }
}

impl Default for SourceEncoding {
    fn default() -> Self {
        Self::Latin1
    }
}

/// Décode les bytes avec la stratégie choisie
pub fn decode(data: &[u8], encoding: SourceEncoding) -> Cow<'_, str> {
    match encoding {
        SourceEncoding::Latin1 => encoding_rs::mem::decode_latin1(data),
        SourceEncoding::Fixed(encoding) => {
            let (decoded, _, _) = encoding.decode(data);
            decoded
        }
        SourceEncoding::Auto => match simdutf8::basic::from_utf8(data) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => encoding_rs::mem::decode_latin1(data),
        },
    }
}
