//! The default substitution engine.

use super::{Delimiter, FilterError, FilterRequest, ReaderFilter};
use crate::constants::MAX_INTERPOLATION_DEPTH;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WINDOWS_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*[a-zA-Z]:\\.*$").expect("Invalid Windows path regex"));

/// Replaces delimited expressions with values from the request's [`FilterContext`].
///
/// * Values may themselves contain expressions; they are resolved recursively
///   and a reference cycle is reported as [`FilterError::Cycle`].
/// * Expressions with no matching property are left untouched, delimiters included.
/// * An expression never spans a line break.
/// * An expression preceded by the escape string is emitted literally, without
///   the escape string.
///
/// [`FilterContext`]: super::FilterContext
///
/// # Examples
///
/// ```
/// use assembly_filter::interpolation::{
///     DelimiterSet, FilterContext, FilterRequest, Properties, PropertyInterpolator, ReaderFilter,
/// };
///
/// let mut props = Properties::new();
/// props.insert("name".to_string(), "demo".to_string());
/// let context = FilterContext::new(props);
/// let delimiters = DelimiterSet::default();
/// let request = FilterRequest {
///     context: &context,
///     delimiters: &delimiters,
///     escape_string: None,
///     properties_file: false,
///     escape_windows_paths: true,
/// };
///
/// let out = PropertyInterpolator.filter("${name} @name@ ${other}", &request).unwrap();
/// assert_eq!(out, "demo demo ${other}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyInterpolator;

impl ReaderFilter for PropertyInterpolator {
    fn filter(&self, source: &str, request: &FilterRequest<'_>) -> Result<String, FilterError> {
        let mut out = String::with_capacity(source.len());
        let mut state = Resolution::default();
        for line in source.split_inclusive('\n') {
            interpolate(line, request, &mut state, &mut out)?;
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "PropertyInterpolator"
    }
}

/// Finds the earliest begin marker in `text`; longer markers win ties.
fn next_expression<'d>(text: &str, request: &'d FilterRequest<'_>) -> Option<(usize, &'d Delimiter)> {
    request
        .delimiters
        .iter()
        .filter_map(|d| text.find(d.begin()).map(|pos| (pos, d)))
        .min_by(|(a_pos, a), (b_pos, b)| {
            a_pos
                .cmp(b_pos)
                .then_with(|| b.begin().len().cmp(&a.begin().len()))
        })
}

/// Resolution state of one `filter` call.
#[derive(Debug, Default)]
struct Resolution {
    /// Expressions currently being resolved; empty for file text.
    stack: Vec<String>,
    /// Fully resolved values, unescaped, keyed by expression.
    resolved: HashMap<String, String>,
}

/// Interpolates one line of file text or of a property value.
fn interpolate(
    text: &str,
    request: &FilterRequest<'_>,
    state: &mut Resolution,
    out: &mut String,
) -> Result<(), FilterError> {
    let escape = request.escape_string.filter(|e| !e.is_empty());
    let mut rest = text;

    while let Some((pos, delimiter)) = next_expression(rest, request) {
        let body_start = pos + delimiter.begin().len();
        let close = rest[body_start..]
            .find(delimiter.end())
            .map(|offset| body_start + offset);

        if let Some(escape) = escape {
            if rest[..pos].ends_with(escape) {
                out.push_str(&rest[..pos - escape.len()]);
                let literal_end = close.map_or(body_start, |c| c + delimiter.end().len());
                out.push_str(&rest[pos..literal_end]);
                rest = &rest[literal_end..];
                continue;
            }
        }

        out.push_str(&rest[..pos]);
        match close {
            Some(close) if close > body_start => {
                let expression = &rest[body_start..close];
                let consumed = close + delimiter.end().len();
                match resolve(expression, request, state)? {
                    Some(value) if state.stack.is_empty() => {
                        out.push_str(&escape_value(value, request))
                    }
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[pos..consumed]),
                }
                rest = &rest[consumed..];
            }
            _ => {
                // Unterminated or empty expression: the marker is plain text.
                out.push_str(delimiter.begin());
                rest = &rest[body_start..];
            }
        }
    }

    out.push_str(rest);
    Ok(())
}

fn resolve(
    expression: &str,
    request: &FilterRequest<'_>,
    state: &mut Resolution,
) -> Result<Option<String>, FilterError> {
    let Some(raw) = request.context.get(expression) else {
        return Ok(None);
    };
    if let Some(value) = state.resolved.get(expression) {
        return Ok(Some(value.clone()));
    }
    if state.stack.iter().any(|e| e == expression) {
        return Err(FilterError::Cycle {
            expression: expression.to_string(),
        });
    }
    if state.stack.len() >= MAX_INTERPOLATION_DEPTH {
        return Err(FilterError::TooDeep {
            expression: expression.to_string(),
        });
    }

    state.stack.push(expression.to_string());
    let mut value = String::with_capacity(raw.len());
    let result = interpolate(raw, request, state, &mut value);
    state.stack.pop();
    result?;
    state
        .resolved
        .insert(expression.to_string(), value.clone());
    Ok(Some(value))
}

fn escape_value(value: String, request: &FilterRequest<'_>) -> String {
    if request.properties_file {
        value.replace('\\', "\\\\")
    } else if request.escape_windows_paths && WINDOWS_PATH.is_match(&value) {
        escape_windows_path(&value)
    } else {
        value
    }
}

/// Doubles every backslash, leaving already doubled ones alone.
fn escape_windows_path(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push_str("\\\\");
            if chars.peek() == Some(&'\\') {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out
}
