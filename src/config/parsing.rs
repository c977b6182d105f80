// src/config/parsing.rs

use crate::interpolation::Properties;
use anyhow::{anyhow, Context, Result};
use glob::Pattern;

/// Parses `KEY=VALUE` arguments into a property map. Later keys win.
pub(super) fn parse_property_args(args: &[String]) -> Result<Properties> {
    args.iter()
        .map(|arg| {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| anyhow!("Invalid property '{}': expected KEY=VALUE", arg))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(anyhow!("Invalid property '{}': empty key", arg));
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Compiles a vector of glob strings.
pub(super) fn compile_glob_vec(patterns: &[String], name: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid {} glob: '{}'", name, p)))
        .collect()
}

/// Strips leading dots from extensions and drops empty entries. Case is kept.
pub(super) fn normalize_extensions(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|s| s.trim().trim_start_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_properties() -> Result<()> {
        let props = parse_property_args(&strings(&["a=1", "b=x=y", "c=", "a=2"]))?;
        assert_eq!(props.get("a").map(String::as_str), Some("2"));
        assert_eq!(props.get("b").map(String::as_str), Some("x=y"));
        assert_eq!(props.get("c").map(String::as_str), Some(""));
        Ok(())
    }

    #[test]
    fn test_parse_invalid_properties() {
        let result = parse_property_args(&strings(&["novalue"]));
        assert!(result.unwrap_err().to_string().contains("expected KEY=VALUE"));

        let result = parse_property_args(&strings(&["=1"]));
        assert!(result.unwrap_err().to_string().contains("empty key"));
    }

    #[test]
    fn test_compile_valid_globs() -> Result<()> {
        let globs = compile_glob_vec(&strings(&["**/*.txt", "conf/*"]), "include")?;
        assert_eq!(globs.len(), 2);
        assert!(globs[0].matches("a/b/c.txt"));
        Ok(())
    }

    #[test]
    fn test_compile_invalid_glob() {
        let result = compile_glob_vec(&strings(&["[abc"]), "include");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid include glob"));
    }

    #[test]
    fn test_normalize_exts() {
        let normalized = normalize_extensions(&strings(&[".Txt", "jar", "", " ."]));
        assert_eq!(normalized, strings(&["Txt", "jar"]));
    }
}
