//! Per-file text transforms applied while a file set is copied.
//!
//! [`file_set_transformer`] looks at the file-set configuration once and
//! decides whether any transform is needed at all. When one is, it returns a
//! [`FileSetTransformer`] whose [`transform`](FileSetTransformer::transform)
//! method is applied to every file:
//!
//! 1. Files whose name ends with a non-filtered extension pass through untouched.
//! 2. Archives (`.zip`, `.jar`) are refused when line endings must change.
//! 3. With filtering enabled, the bytes are decoded, handed to the
//!    [`ReaderFilter`] and re-encoded. Property files always use ISO-8859-1.
//! 4. With a line-ending policy other than `keep`, the stream is wrapped in a
//!    [`LineEndingReader`].

use crate::config::FilteringConfig;
use crate::constants::{DEFAULT_ENCODING, PROPERTY_FILE_ENCODING};
use crate::errors::{Error, Result};
use crate::interpolation::{DelimiterSet, FilterContext, FilterError, FilterRequest, ReaderFilter};
use log::{debug, warn};
use std::io::{Cursor, Read};
use std::sync::Arc;

mod encoding;
mod file_type;
mod line_endings;

pub use encoding::TextEncoding;
pub use file_type::{has_non_filtered_extension, is_binary_container, is_property_file};
pub use line_endings::{line_ending_converter, LineEnding, LineEndingReader};

/// Decides once whether files of a file set need transforming.
///
/// Returns `Ok(None)` when `is_filtered` is false and the line-ending policy is
/// `keep` (or absent): callers can then copy bytes without wrapping any stream.
///
/// The returned transformer holds an immutable snapshot of everything it needs:
/// filter files are read here, not per file.
///
/// # Errors
/// * [`Error::IllegalLineEnding`] for an unknown policy name.
/// * [`Error::UnsupportedEncoding`] for an unusable encoding label.
/// * [`Error::Config`] for an invalid delimiter spec.
/// * [`Error::Io`] when a filter file cannot be read.
///
/// # Examples
///
/// ```
/// use assembly_filter::config::FilteringConfig;
/// use assembly_filter::format::file_set_transformer;
/// use assembly_filter::interpolation::PropertyInterpolator;
/// use std::sync::Arc;
///
/// let config = FilteringConfig::default();
/// let engine = Arc::new(PropertyInterpolator);
///
/// let none = file_set_transformer(&config, engine.clone(), false, &[], Some("keep")).unwrap();
/// assert!(none.is_none());
///
/// let some = file_set_transformer(&config, engine, false, &[], Some("unix")).unwrap();
/// assert!(some.is_some());
/// ```
pub fn file_set_transformer(
    config: &FilteringConfig,
    engine: Arc<dyn ReaderFilter>,
    is_filtered: bool,
    non_filtered_extensions: &[String],
    line_ending: Option<&str>,
) -> Result<Option<FileSetTransformer>> {
    let line_ending = LineEnding::from_policy(line_ending)?;

    if line_ending.is_keep() && !is_filtered {
        debug!("Neither filtering nor line-ending conversion requested; no transform needed");
        return Ok(None);
    }

    let text_filter = if is_filtered {
        Some(TextFilter::new(config, engine)?)
    } else {
        None
    };

    debug!(
        "File set transformer: filtered={}, line ending={}",
        is_filtered, line_ending
    );

    Ok(Some(FileSetTransformer {
        text_filter,
        line_ending,
        non_filtered_extensions: non_filtered_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect(),
    }))
}

/// The per-file transform produced by [`file_set_transformer`].
///
/// Stateless across calls and `Send + Sync`, so one instance can serve a
/// parallel copy loop.
#[derive(Debug)]
pub struct FileSetTransformer {
    text_filter: Option<TextFilter>,
    line_ending: LineEnding,
    non_filtered_extensions: Vec<String>,
}

impl FileSetTransformer {
    /// Transforms the content of the resource called `name`.
    ///
    /// The returned stream is `input` itself when the name carries a
    /// non-filtered extension, whatever else is configured.
    ///
    /// # Errors
    /// * [`Error::BinaryContainer`] when line endings must change and `name`
    ///   ends with `.zip` or `.jar`.
    /// * [`Error::Filtering`] when the substitution engine fails.
    /// * [`Error::Io`] when `input` cannot be read for filtering.
    pub fn transform<'a, R: Read + Send + 'a>(
        &self,
        name: &str,
        input: R,
    ) -> Result<Box<dyn Read + Send + 'a>> {
        if self.is_pass_through(name) {
            debug!("'{}' has a non-filtered extension, copying unchanged", name);
            return Ok(Box::new(input));
        }

        // Refuse before any work is done on the stream.
        if !self.line_ending.is_keep() && is_binary_container(name) {
            return Err(Error::BinaryContainer {
                name: name.to_string(),
            });
        }

        let mut result: Box<dyn Read + Send + 'a> = Box::new(input);
        if let Some(text_filter) = &self.text_filter {
            result = Box::new(Cursor::new(text_filter.apply(name, result)?));
        }
        Ok(line_ending_converter(result, self.line_ending))
    }

    /// Whether `name` carries a non-filtered extension and is copied unchanged.
    pub fn is_pass_through(&self, name: &str) -> bool {
        has_non_filtered_extension(name, &self.non_filtered_extensions)
    }

    /// Whether file content is run through the substitution engine.
    pub fn is_filtered(&self) -> bool {
        self.text_filter.is_some()
    }

    /// The line-ending policy applied to transformed files.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

/// Filtering state shared by every file of a file set.
#[derive(Debug)]
struct TextFilter {
    engine: Arc<dyn ReaderFilter>,
    context: FilterContext,
    delimiters: DelimiterSet,
    escape_string: Option<String>,
    encoding: TextEncoding,
    property_file_encoding: TextEncoding,
    escape_windows_paths: bool,
}

impl TextFilter {
    fn new(config: &FilteringConfig, engine: Arc<dyn ReaderFilter>) -> Result<Self> {
        let encoding = match config.encoding.as_deref() {
            Some(label) => TextEncoding::for_label(label)?,
            None => {
                warn!(
                    "File encoding has not been set, using {} to filter file set content",
                    DEFAULT_ENCODING
                );
                TextEncoding::for_label(DEFAULT_ENCODING)?
            }
        };

        let delimiters = DelimiterSet::from_specs(&config.delimiters).map_err(|spec| {
            Error::Config(format!("Invalid delimiter specification: '{}'", spec))
        })?;

        let context = FilterContext::from_config(config).map_err(|e| match e {
            FilterError::Io { path, source } => Error::Io { path, source },
            other => Error::Config(other.to_string()),
        })?;

        Ok(Self {
            engine,
            context,
            delimiters,
            escape_string: config.escape_string.clone(),
            encoding,
            property_file_encoding: TextEncoding::for_label(PROPERTY_FILE_ENCODING)?,
            escape_windows_paths: config.escape_windows_paths,
        })
    }

    fn apply(&self, name: &str, mut input: impl Read) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        input
            .read_to_end(&mut bytes)
            .map_err(|source| Error::Io {
                path: name.to_string(),
                source,
            })?;

        let properties_file = is_property_file(name);
        let encoding = if properties_file {
            self.property_file_encoding
        } else {
            self.encoding
        };
        debug!(
            "Filtering '{}' as {} with {}",
            name,
            encoding,
            self.engine.name()
        );

        let request = FilterRequest {
            context: &self.context,
            delimiters: &self.delimiters,
            escape_string: self.escape_string.as_deref(),
            properties_file,
            escape_windows_paths: self.escape_windows_paths,
        };

        let filtered = self
            .engine
            .filter(&encoding.decode(&bytes), &request)
            .map_err(|source| Error::Filtering {
                name: name.to_string(),
                source,
            })?;

        Ok(encoding.encode(&filtered).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::PropertyInterpolator;

    fn filtering_config(pairs: &[(&str, &str)]) -> FilteringConfig {
        let mut config = FilteringConfig {
            encoding: Some("UTF-8".to_string()),
            ..Default::default()
        };
        for (k, v) in pairs {
            config
                .additional_properties
                .insert(k.to_string(), v.to_string());
        }
        config
    }

    fn transformer(
        config: &FilteringConfig,
        filtered: bool,
        exts: &[&str],
        line_ending: Option<&str>,
    ) -> FileSetTransformer {
        let exts: Vec<String> = exts.iter().map(|s| s.to_string()).collect();
        file_set_transformer(config, Arc::new(PropertyInterpolator), filtered, &exts, line_ending)
            .unwrap()
            .unwrap()
    }

    fn run(t: &FileSetTransformer, name: &str, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        t.transform(name, input)?
            .read_to_end(&mut out)
            .map_err(|source| Error::Io {
                path: name.to_string(),
                source,
            })?;
        Ok(out)
    }

    /// Fails every call, to observe how engine errors surface.
    struct FailingFilter;

    impl ReaderFilter for FailingFilter {
        fn filter(&self, _: &str, _: &FilterRequest<'_>) -> Result<String, FilterError> {
            Err(FilterError::Engine("boom".to_string()))
        }
        fn name(&self) -> &'static str {
            "FailingFilter"
        }
    }

    #[test]
    fn test_no_transform_when_keep_and_unfiltered() -> Result<()> {
        let config = FilteringConfig::default();
        let engine: Arc<dyn ReaderFilter> = Arc::new(PropertyInterpolator);
        assert!(file_set_transformer(&config, engine.clone(), false, &[], None)?.is_none());
        assert!(file_set_transformer(&config, engine, false, &[], Some("keep"))?.is_none());
        Ok(())
    }

    #[test]
    fn test_illegal_line_ending_rejected_up_front() {
        let config = FilteringConfig::default();
        let result = file_set_transformer(&config, Arc::new(PropertyInterpolator), false, &[], Some("mac"));
        assert!(matches!(result, Err(Error::IllegalLineEnding(_))));
    }

    #[test]
    fn test_excluded_extension_is_byte_identical() -> Result<()> {
        let config = filtering_config(&[("v", "X")]);
        let t = transformer(&config, true, &["txt"], Some("windows"));
        let input = b"${v}\nline\r\n\xff\xfe";
        assert_eq!(run(&t, "readme.txt", input)?, input.to_vec());
        Ok(())
    }

    #[test]
    fn test_excluded_extension_wins_over_container_check() -> Result<()> {
        let config = FilteringConfig::default();
        let t = transformer(&config, false, &[".zip"], Some("unix"));
        assert_eq!(run(&t, "archive.zip", b"PK\r\n")?, b"PK\r\n".to_vec());
        Ok(())
    }

    #[test]
    fn test_container_with_line_endings_fails() {
        let config = FilteringConfig::default();
        let t = transformer(&config, false, &[], Some("unix"));
        for name in ["archive.zip", "lib/App.JAR"] {
            match t.transform(name, &b"PK"[..]) {
                Err(Error::BinaryContainer { name: reported }) => assert_eq!(reported, name),
                Err(other) => panic!("unexpected error {other}"),
                Ok(_) => panic!("expected BinaryContainer error for {name}"),
            }
        }
    }

    #[test]
    fn test_container_filtered_without_line_endings_is_allowed() -> Result<()> {
        let config = filtering_config(&[]);
        let t = transformer(&config, true, &[], None);
        assert!(t.transform("archive.zip", &b"PK"[..]).is_ok());
        Ok(())
    }

    #[test]
    fn test_property_file_uses_latin1() -> Result<()> {
        let config = filtering_config(&[("v", "é")]);
        let t = transformer(&config, true, &[], None);
        // 0xE9 is 'é' in ISO-8859-1 and invalid on its own in UTF-8.
        let out = run(&t, "app.properties", b"name=caf\xe9 ${v}\n")?;
        assert_eq!(out, b"name=caf\xe9 \xe9\n".to_vec());
        Ok(())
    }

    #[test]
    fn test_project_encoding_for_other_files() -> Result<()> {
        let config = filtering_config(&[("v", "é")]);
        let t = transformer(&config, true, &[], None);
        let out = run(&t, "app.txt", "café ${v}".as_bytes())?;
        assert_eq!(out, "café é".as_bytes().to_vec());
        Ok(())
    }

    #[test]
    fn test_default_delimiters_for_properties() -> Result<()> {
        let config = filtering_config(&[("a", "1"), ("b", "2")]);
        let t = transformer(&config, true, &[], None);
        assert_eq!(run(&t, "app.properties", b"x=${a}\ny=@b@\n")?, b"x=1\ny=2\n".to_vec());
        Ok(())
    }

    #[test]
    fn test_text_without_tokens_round_trips() -> Result<()> {
        let config = filtering_config(&[("a", "1")]);
        let t = transformer(&config, true, &[], None);
        let input = "no tokens here\r\n{ $ } a@b\n".as_bytes();
        assert_eq!(run(&t, "notes.md", input)?, input.to_vec());
        Ok(())
    }

    #[test]
    fn test_filter_then_normalize() -> Result<()> {
        let config = filtering_config(&[("v", "1")]);
        let t = transformer(&config, true, &[], Some("dos"));
        assert_eq!(run(&t, "a.txt", b"${v}\nx\r\n")?, b"1\r\nx\r\n".to_vec());
        Ok(())
    }

    #[test]
    fn test_engine_failure_wrapped_with_name() {
        let config = filtering_config(&[]);
        let t = file_set_transformer(&config, Arc::new(FailingFilter), true, &[], None)
            .unwrap()
            .unwrap();
        match t.transform("conf/app.xml", &b"x"[..]) {
            Err(e @ Error::Filtering { .. }) => {
                let message = e.to_string();
                assert!(message.contains("conf/app.xml"));
                assert!(message.contains("boom"));
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("expected a filtering error"),
        }
    }

    #[test]
    fn test_unset_encoding_defaults_to_utf8() -> Result<()> {
        let mut config = filtering_config(&[("v", "ü")]);
        config.encoding = None;
        let t = transformer(&config, true, &[], None);
        assert_eq!(run(&t, "a.txt", b"${v}")?, "ü".as_bytes().to_vec());
        Ok(())
    }

    #[test]
    fn test_unsupported_encoding_rejected() {
        let mut config = filtering_config(&[]);
        config.encoding = Some("UTF-16".to_string());
        let result = file_set_transformer(&config, Arc::new(PropertyInterpolator), true, &[], None);
        assert!(matches!(result, Err(Error::UnsupportedEncoding(_))));
    }

    #[test]
    fn test_invalid_delimiter_rejected() {
        let mut config = filtering_config(&[]);
        config.delimiters = vec!["*}".to_string()];
        let result = file_set_transformer(&config, Arc::new(PropertyInterpolator), true, &[], None);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_transformer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileSetTransformer>();
    }
}
