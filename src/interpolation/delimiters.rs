// src/interpolation/delimiters.rs

use crate::constants::{DEFAULT_AT_DELIMITER, DEFAULT_EXPRESSION_DELIMITER};

/// A begin/end marker pair enclosing an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiter {
    begin: String,
    end: String,
}

impl Delimiter {
    /// Parses a delimiter spec.
    ///
    /// A spec containing `*` is split around it: `${*}` opens with `${` and
    /// closes with `}`. A spec without `*` uses the same string on both sides,
    /// so `@` yields `@expr@`. Returns `None` when either side would be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use assembly_filter::interpolation::Delimiter;
    ///
    /// let dollar = Delimiter::parse("${*}").unwrap();
    /// assert_eq!((dollar.begin(), dollar.end()), ("${", "}"));
    ///
    /// let at = Delimiter::parse("@").unwrap();
    /// assert_eq!((at.begin(), at.end()), ("@", "@"));
    ///
    /// assert!(Delimiter::parse("*}").is_none());
    /// ```
    pub fn parse(spec: &str) -> Option<Self> {
        let (begin, end) = match spec.split_once('*') {
            Some((begin, end)) => (begin, end),
            None => (spec, spec),
        };
        if begin.is_empty() || end.is_empty() {
            return None;
        }
        Some(Self {
            begin: begin.to_string(),
            end: end.to_string(),
        })
    }

    /// The opening marker.
    pub fn begin(&self) -> &str {
        &self.begin
    }

    /// The closing marker.
    pub fn end(&self) -> &str {
        &self.end
    }
}

/// Ordered, duplicate-free list of delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterSet(Vec<Delimiter>);

impl DelimiterSet {
    /// Builds the set from configured specs.
    ///
    /// An empty list yields the default `${*}` and `@` pair. Blank entries stand
    /// for `${*}`. Later duplicates are dropped.
    ///
    /// # Errors
    /// Returns the offending spec when it cannot be parsed.
    pub fn from_specs<S: AsRef<str>>(specs: &[S]) -> Result<Self, String> {
        if specs.is_empty() {
            return Ok(Self::default());
        }

        let mut delimiters: Vec<Delimiter> = Vec::with_capacity(specs.len());
        for spec in specs {
            let spec = spec.as_ref();
            let spec = if spec.trim().is_empty() {
                DEFAULT_EXPRESSION_DELIMITER
            } else {
                spec
            };
            let delimiter = Delimiter::parse(spec).ok_or_else(|| spec.to_string())?;
            if !delimiters.contains(&delimiter) {
                delimiters.push(delimiter);
            }
        }
        Ok(Self(delimiters))
    }

    /// Iterates the delimiters in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Delimiter> {
        self.0.iter()
    }

    /// Number of delimiters in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for sets built through this module.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self(
            [DEFAULT_EXPRESSION_DELIMITER, DEFAULT_AT_DELIMITER]
                .iter()
                .filter_map(|spec| Delimiter::parse(spec))
                .collect(),
        )
    }
}
