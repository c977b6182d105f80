//! Reader for Java-style `.properties` files, the format of filter files.

use super::{FilterError, Properties};
use std::fs;
use std::path::Path;

/// Loads a properties file from disk.
///
/// The file is decoded as ISO-8859-1; non-Latin-1 characters must be written
/// as `\uXXXX` escapes.
///
/// # Errors
/// Returns [`FilterError::Io`] if the file cannot be read.
pub fn load_properties_file(path: &Path) -> Result<Properties, FilterError> {
    let bytes = fs::read(path).map_err(|source| FilterError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_properties(&encoding_rs::mem::decode_latin1(&bytes)))
}

/// Parses properties text.
///
/// Supports `#`/`!` comments, `=`, `:` or whitespace separators, backslash
/// line continuations and the usual escapes (`\t`, `\n`, `\r`, `\f`, `\uXXXX`).
/// Later keys override earlier ones.
///
/// # Examples
///
/// ```
/// use assembly_filter::interpolation::parse_properties;
///
/// let props = parse_properties("# comment\nname = demo\npath: a\\\n    b\n");
/// assert_eq!(props.get("name").map(String::as_str), Some("demo"));
/// assert_eq!(props.get("path").map(String::as_str), Some("ab"));
/// ```
pub fn parse_properties(text: &str) -> Properties {
    let mut properties = Properties::new();
    let mut logical = String::new();
    let mut continuing = false;

    for raw in text.lines() {
        let line = raw.trim_start_matches(is_blank);
        if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        let trailing_backslashes = line.chars().rev().take_while(|c| *c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            logical.push_str(&line[..line.len() - 1]);
            continuing = true;
            continue;
        }

        logical.push_str(line);
        continuing = false;
        let (key, value) = split_key_value(&logical);
        properties.insert(key, value);
        logical.clear();
    }

    // Continuation on the last line of the file.
    if !logical.is_empty() {
        let (key, value) = split_key_value(&logical);
        properties.insert(key, value);
    }

    properties
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn split_key_value(line: &str) -> (String, String) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(|c: char| c == '=' || c == ':') {
        rest = stripped.trim_start_matches(is_blank);
    }
    (unescape(key), unescape(rest))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        // Malformed escape, keep it as written.
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
