//! Character-encoding normalization for parsed text.
//!
//! The lexicon files are UTF-8, but consumers historically worked in legacy
//! single-byte encodings. The parser therefore passes every character-data
//! chunk through a [`Transcoder`] configured with a destination encoding:
//! characters with no representation in the destination are rewritten as
//! decimal numeric character references (`&#1071;`), everything else is left
//! intact. Results stay UTF-8 `String`s, restricted to the destination
//! repertoire.
//!
//! An unknown destination-encoding label fails at construction time, before
//! any parsing begins.

use encoding_rs::{Encoding, UTF_8};

use crate::error::{Result, WnQueryError};

/// Normalizes UTF-8 text to a destination encoding's character repertoire.
#[derive(Debug)]
pub struct Transcoder {
    encoding: &'static Encoding,
}

impl Transcoder {
    /// Create a transcoder for the destination encoding named by `label`
    /// (a WHATWG encoding label such as `UTF-8`, `ISO-8859-2` or
    /// `windows-1250`).
    ///
    /// Returns a configuration error for an unrecognized label.
    pub fn new(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| WnQueryError::config(format!("unknown character encoding '{label}'")))?;
        Ok(Transcoder { encoding })
    }

    /// Create a transcoder that leaves text unchanged.
    pub fn utf8() -> Self {
        Transcoder { encoding: UTF_8 }
    }

    /// Canonical name of the destination encoding.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Convert one chunk of text.
    ///
    /// Characters not representable in the destination encoding come back as
    /// decimal numeric character references; representable text is unchanged.
    pub fn convert(&self, text: &str) -> String {
        if self.encoding == UTF_8 {
            return text.to_string();
        }
        // Encoding substitutes numeric character references for unmappable
        // characters; decoding back yields the normalized UTF-8 form.
        let (bytes, _, _) = self.encoding.encode(text);
        let (normalized, _, _) = self.encoding.decode(&bytes);
        normalized.into_owned()
    }
}
