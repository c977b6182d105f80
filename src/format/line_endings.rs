//! Line-ending policies and the streaming normalizer that applies them.

use crate::errors::{Error, Result};
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

const LF: &[u8] = b"\n";
const CRLF: &[u8] = b"\r\n";
const BUFFER_SIZE: usize = 8 * 1024;

/// Target line-ending convention for a file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Leave line terminators untouched.
    #[default]
    Keep,
    /// `\n`.
    Unix,
    /// `\n`.
    Lf,
    /// `\r\n`.
    Dos,
    /// `\r\n`.
    Windows,
    /// `\r\n`.
    Crlf,
    /// The native terminator of the platform running the copy.
    Autodetect,
}

impl LineEnding {
    const ALL: [LineEnding; 7] = [
        LineEnding::Keep,
        LineEnding::Unix,
        LineEnding::Lf,
        LineEnding::Dos,
        LineEnding::Windows,
        LineEnding::Crlf,
        LineEnding::Autodetect,
    ];

    /// Resolves an optional policy name; no name means [`LineEnding::Keep`].
    ///
    /// # Errors
    /// Returns [`Error::IllegalLineEnding`] for an unknown name.
    pub fn from_policy(policy: Option<&str>) -> Result<Self> {
        policy.map_or(Ok(Self::Keep), str::parse)
    }

    /// The policy name as written in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Unix => "unix",
            Self::Lf => "lf",
            Self::Dos => "dos",
            Self::Windows => "windows",
            Self::Crlf => "crlf",
            Self::Autodetect => "autodetect",
        }
    }

    /// The terminator this policy writes, or `None` for [`LineEnding::Keep`].
    pub fn terminator(self) -> Option<&'static [u8]> {
        match self {
            Self::Keep => None,
            Self::Unix | Self::Lf => Some(LF),
            Self::Dos | Self::Windows | Self::Crlf => Some(CRLF),
            Self::Autodetect if cfg!(windows) => Some(CRLF),
            Self::Autodetect => Some(LF),
        }
    }

    /// Whether this policy leaves files untouched.
    pub fn is_keep(self) -> bool {
        self == Self::Keep
    }
}

impl FromStr for LineEnding {
    type Err = Error;

    /// Parses a policy name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|ending| ending.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::IllegalLineEnding(s.to_string()))
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wraps `input` so that its line terminators follow `ending`.
///
/// [`LineEnding::Keep`] returns the stream as is.
pub fn line_ending_converter<'a, R: Read + Send + 'a>(
    input: R,
    ending: LineEnding,
) -> Box<dyn Read + Send + 'a> {
    match ending.terminator() {
        Some(terminator) => Box::new(LineEndingReader::new(input, terminator)),
        None => Box::new(input),
    }
}

/// A reader that rewrites every `\r\n`, lone `\r` and lone `\n` of the inner
/// stream to a fixed terminator.
///
/// Works on raw bytes, so it is only meaningful for ASCII-compatible text.
/// No terminator is added at end of stream.
///
/// # Examples
///
/// ```
/// use assembly_filter::format::LineEndingReader;
/// use std::io::Read;
///
/// let mut reader = LineEndingReader::new(&b"a\r\nb\rc\n"[..], b"\n");
/// let mut out = String::new();
/// reader.read_to_string(&mut out).unwrap();
/// assert_eq!(out, "a\nb\nc\n");
/// ```
pub struct LineEndingReader<R> {
    inner: R,
    terminator: &'static [u8],
    buf: Vec<u8>,
    out: Vec<u8>,
    pos: usize,
    pending_cr: bool,
    eof: bool,
}

impl<R: Read> LineEndingReader<R> {
    /// Creates a normalizer writing `terminator` for each line break.
    pub fn new(inner: R, terminator: &'static [u8]) -> Self {
        Self {
            inner,
            terminator,
            buf: vec![0; BUFFER_SIZE],
            out: Vec::with_capacity(BUFFER_SIZE + BUFFER_SIZE / 2),
            pos: 0,
            pending_cr: false,
            eof: false,
        }
    }

    /// Reads the next chunk of the inner stream and converts it into `out`.
    fn fill(&mut self) -> io::Result<()> {
        self.out.clear();
        self.pos = 0;

        let n = loop {
            match self.inner.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if n == 0 {
            self.eof = true;
            if self.pending_cr {
                self.pending_cr = false;
                self.out.extend_from_slice(self.terminator);
            }
            return Ok(());
        }

        for &byte in &self.buf[..n] {
            if self.pending_cr {
                self.pending_cr = false;
                self.out.extend_from_slice(self.terminator);
                if byte == b'\n' {
                    continue;
                }
            }
            match byte {
                b'\r' => self.pending_cr = true,
                b'\n' => self.out.extend_from_slice(self.terminator),
                other => self.out.push(other),
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for LineEndingReader<R> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        while self.pos == self.out.len() {
            if self.eof {
                return Ok(0);
            }
            self.fill()?;
        }
        let n = dst.len().min(self.out.len() - self.pos);
        dst[..n].copy_from_slice(&self.out[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl<R> fmt::Debug for LineEndingReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineEndingReader")
            .field("terminator", &self.terminator)
            .field("eof", &self.eof)
            .finish_non_exhaustive()
    }
}
