//! Text encodings used when a file is decoded for filtering.

use crate::errors::{Error, Result};
use encoding_rs::{EncoderResult, Encoding, UTF_8};
use std::borrow::Cow;
use std::fmt;

/// Labels that denote true ISO-8859-1 rather than the windows-1252 superset
/// the WHATWG table maps them to.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859_1",
    "iso8859_1",
    "8859_1",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
];

/// A character encoding able to both decode and encode text.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
    /// Any other encoding with a WHATWG label.
    Whatwg(&'static Encoding),
}

impl TextEncoding {
    /// UTF-8.
    pub fn utf8() -> Self {
        Self::Whatwg(UTF_8)
    }

    /// Resolves an encoding label such as `UTF-8`, `ISO-8859-1` or `windows-1252`.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedEncoding`] for unknown labels and for
    /// encodings that cannot be written back (UTF-16, `replacement`).
    ///
    /// # Examples
    ///
    /// ```
    /// use assembly_filter::format::TextEncoding;
    ///
    /// assert_eq!(TextEncoding::for_label("latin1").unwrap(), TextEncoding::Latin1);
    /// assert_eq!(TextEncoding::for_label("utf8").unwrap(), TextEncoding::utf8());
    /// assert!(TextEncoding::for_label("UTF-16LE").is_err());
    /// assert!(TextEncoding::for_label("klingon").is_err());
    /// ```
    pub fn for_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        if LATIN1_LABELS.contains(&normalized.as_str()) {
            return Ok(Self::Latin1);
        }
        match Encoding::for_label(normalized.as_bytes()) {
            Some(encoding) if encoding.output_encoding() == encoding => Ok(Self::Whatwg(encoding)),
            _ => Err(Error::UnsupportedEncoding(label.to_string())),
        }
    }

    /// The canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decodes `bytes`. Malformed sequences become U+FFFD; a BOM is kept as text.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            Self::Latin1 => encoding_rs::mem::decode_latin1(bytes),
            Self::Whatwg(encoding) => encoding.decode_without_bom_handling(bytes).0,
        }
    }

    /// Encodes `text`. Characters the encoding cannot represent become `?`.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        match self {
            Self::Latin1 => {
                if text.is_ascii() {
                    return Cow::Borrowed(text.as_bytes());
                }
                Cow::Owned(
                    text.chars()
                        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                        .collect(),
                )
            }
            Self::Whatwg(encoding) if *encoding == UTF_8 => Cow::Borrowed(text.as_bytes()),
            Self::Whatwg(encoding) => Cow::Owned(encode_with_question_marks(encoding, text)),
        }
    }
}

fn encode_with_question_marks(encoding: &'static Encoding, text: &str) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len() + 16);
    let mut src = text;
    loop {
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(src, &mut out, true);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => out.reserve(src.len() + 16),
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }
    out
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
