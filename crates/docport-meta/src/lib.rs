//! Markdown front matter parsing for docport.
//!
//! Splits a markdown document into its YAML front matter block and the
//! remaining body:
//!
//! ```text
//! ---
//! page_title: Install Vault
//! description: How to install Vault
//! ---
//!
//! # Install Vault
//! ```
//!
//! The block must start on the first line with `---` and ends at the next
//! line consisting of `---` (or `...`). Documents without an opening
//! delimiter have no metadata and the whole content is the body.

use serde_json::{Map, Value};

/// Front matter metadata: a free-form mapping of YAML values.
pub type Metadata = Map<String, Value>;

/// Document split into metadata and markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Parsed front matter (empty when the document has none).
    pub metadata: Metadata,
    /// Markdown following the front matter block.
    pub markdown_source: String,
}

/// Front matter parse error.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// Opening delimiter without a closing one.
    #[error("Front matter block is not terminated")]
    Unterminated,
    /// Block content is not a valid YAML mapping.
    #[error("Invalid YAML: {0}")]
    Parse(String),
}

/// Front matter parser.
///
/// Abstracted so the resolution handler can be tested with a parser that
/// fails on demand.
pub trait FrontMatter: Send + Sync {
    /// Split `raw` into metadata and body.
    ///
    /// # Errors
    ///
    /// Returns [`FrontMatterError`] if the front matter block is malformed.
    fn parse(&self, raw: &str) -> Result<ParsedDocument, FrontMatterError>;
}

/// YAML front matter parser backed by `serde_yaml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFrontMatter;

impl FrontMatter for YamlFrontMatter {
    fn parse(&self, raw: &str) -> Result<ParsedDocument, FrontMatterError> {
        parse_front_matter(raw)
    }
}

/// Split a markdown document into front matter and body.
///
/// # Errors
///
/// Returns [`FrontMatterError::Unterminated`] when the closing delimiter is
/// missing and [`FrontMatterError::Parse`] when the block is not a YAML mapping.
pub fn parse_front_matter(raw: &str) -> Result<ParsedDocument, FrontMatterError> {
    let Some(rest) = strip_opening_delimiter(raw) else {
        return Ok(ParsedDocument {
            metadata: Metadata::new(),
            markdown_source: raw.to_owned(),
        });
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content == "---" || content == "..." {
            let metadata = parse_yaml(&rest[..offset])?;
            return Ok(ParsedDocument {
                metadata,
                markdown_source: rest[offset + line.len()..].to_owned(),
            });
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Return the content after the opening `---` line, if present.
fn strip_opening_delimiter(raw: &str) -> Option<&str> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    raw.strip_prefix("---\n")
        .or_else(|| raw.strip_prefix("---\r\n"))
}

/// Parse the YAML block into a JSON-compatible mapping.
fn parse_yaml(block: &str) -> Result<Metadata, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|e| FrontMatterError::Parse(e.to_string()))?;

    match serde_json::to_value(value).map_err(|e| FrontMatterError::Parse(e.to_string()))? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Metadata::new()),
        other => Err(FrontMatterError::Parse(format!(
            "expected a mapping, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
