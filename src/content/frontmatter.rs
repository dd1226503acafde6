//! Front-matter parsing
//!
//! A content file may open with a delimited metadata block:
//!
//! - YAML between `---` lines
//! - TOML between `+++` lines
//! - JSON between `;;;` lines
//!
//! Everything after the closing delimiter is the body, which is returned
//! untouched apart from the blank lines that separate it from the block.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use super::error::FrontMatterError;

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Flat list of scalars, e.g. `tags: [rust, web]`
    List(Vec<MetaValue>),
}

impl MetaValue {
    /// The value as a string slice, if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn is_scalar(&self) -> bool {
        !matches!(self, MetaValue::List(_))
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Null => Ok(()),
            MetaValue::Bool(b) => write!(f, "{}", b),
            MetaValue::Integer(i) => write!(f, "{}", i),
            MetaValue::Float(x) => write!(f, "{}", x),
            MetaValue::String(s) => f.write_str(s),
            MetaValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::String(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::String(s)
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Bool(b)
    }
}

impl From<i64> for MetaValue {
    fn from(i: i64) -> Self {
        MetaValue::Integer(i)
    }
}

/// Ordered key/value metadata parsed from a front-matter block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Look up a string-valued field
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.get_str("excerpt")
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.get_str("cover_image")
    }

    /// Publish date, parsed from the `date` field
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.get_str("date").and_then(parse_date_string)
    }

    /// Tags, accepting either a single string or a list of strings
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags") {
            Some(MetaValue::String(s)) => vec![s.clone()],
            Some(MetaValue::List(items)) => items
                .iter()
                .filter(|v| !matches!(v, MetaValue::Null))
                .map(|v| v.to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `draft: true` or `published: false`
    pub fn is_draft(&self) -> bool {
        let draft = self.get("draft").and_then(MetaValue::as_bool);
        let published = self.get("published").and_then(MetaValue::as_bool);
        draft == Some(true) || published == Some(false)
    }
}

impl<K: Into<String>> FromIterator<(K, MetaValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, MetaValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    Yaml,
    Toml,
    Json,
}

impl Format {
    fn delimiter(self) -> &'static str {
        match self {
            Format::Yaml => "---",
            Format::Toml => "+++",
            Format::Json => ";;;",
        }
    }

    fn from_line(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(Format::Yaml),
            "+++" => Some(Format::Toml),
            ";;;" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Front-matter parser
pub struct FrontMatter;

impl FrontMatter {
    /// Split content into its metadata and body.
    ///
    /// Content without an opening delimiter has empty metadata and is
    /// returned whole as the body.
    pub fn parse(content: &str) -> Result<(Metadata, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        // Blank lines before the opening delimiter are tolerated
        let start = content.len() - content.trim_start().len();
        let candidate = &content[start..];
        let (first_line, rest) = match candidate.split_once('\n') {
            Some((line, rest)) => (line, rest),
            None => (candidate, ""),
        };

        let Some(format) = Format::from_line(first_line) else {
            return Ok((Metadata::default(), content));
        };

        let (block, body) = split_block(rest, format.delimiter())?;
        let metadata = match format {
            Format::Yaml => parse_yaml(block)?,
            Format::Toml => parse_toml(block)?,
            Format::Json => parse_json(block)?,
        };

        Ok((metadata, body.trim_start_matches(['\n', '\r'])))
    }
}

/// Find the closing delimiter line; returns (block, remaining)
fn split_block<'a>(
    rest: &'a str,
    delimiter: &'static str,
) -> Result<(&'a str, &'a str), FrontMatterError> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated(delimiter))
}

fn parse_yaml(block: &str) -> Result<Metadata, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(block)?;
    let mapping = match value {
        // A block holding only comments
        serde_yaml::Value::Null => return Ok(Metadata::default()),
        serde_yaml::Value::Mapping(m) => m,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            _ => return Err(FrontMatterError::NotAMapping),
        };
        let value = from_yaml(&key, value)?;
        metadata.insert(key, value);
    }
    Ok(metadata)
}

fn from_yaml(key: &str, value: serde_yaml::Value) -> Result<MetaValue, FrontMatterError> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => MetaValue::Null,
        Value::Bool(b) => b.into(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => MetaValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => s.into(),
        Value::Sequence(items) => list(key, items, from_yaml)?,
        Value::Tagged(tagged) => from_yaml(key, tagged.value)?,
        Value::Mapping(_) => {
            return Err(FrontMatterError::NestedValue {
                key: key.to_string(),
            })
        }
    })
}

fn parse_toml(block: &str) -> Result<Metadata, FrontMatterError> {
    let table: toml::Table = toml::from_str(block)?;

    let mut metadata = Metadata::new();
    for (key, value) in table {
        let value = from_toml(&key, value)?;
        metadata.insert(key, value);
    }
    Ok(metadata)
}

fn from_toml(key: &str, value: toml::Value) -> Result<MetaValue, FrontMatterError> {
    use toml::Value;

    Ok(match value {
        Value::Boolean(b) => b.into(),
        Value::Integer(i) => i.into(),
        Value::Float(x) => MetaValue::Float(x),
        Value::String(s) => s.into(),
        Value::Datetime(dt) => dt.to_string().into(),
        Value::Array(items) => list(key, items, from_toml)?,
        Value::Table(_) => {
            return Err(FrontMatterError::NestedValue {
                key: key.to_string(),
            })
        }
    })
}

fn parse_json(block: &str) -> Result<Metadata, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let value: serde_json::Value = serde_json::from_str(block)?;
    let serde_json::Value::Object(object) = value else {
        return Err(FrontMatterError::NotAMapping);
    };

    let mut metadata = Metadata::new();
    for (key, value) in object {
        let value = from_json(&key, value)?;
        metadata.insert(key, value);
    }
    Ok(metadata)
}

fn from_json(key: &str, value: serde_json::Value) -> Result<MetaValue, FrontMatterError> {
    use serde_json::Value;

    Ok(match value {
        Value::Null => MetaValue::Null,
        Value::Bool(b) => b.into(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => MetaValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => s.into(),
        Value::Array(items) => list(key, items, from_json)?,
        Value::Object(_) => {
            return Err(FrontMatterError::NestedValue {
                key: key.to_string(),
            })
        }
    })
}

/// Convert a sequence, rejecting anything but scalars inside it
fn list<T>(
    key: &str,
    items: Vec<T>,
    convert: fn(&str, T) -> Result<MetaValue, FrontMatterError>,
) -> Result<MetaValue, FrontMatterError> {
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        let value = convert(key, item)?;
        if !value.is_scalar() {
            return Err(FrontMatterError::NestedValue {
                key: key.to_string(),
            });
        }
        values.push(value);
    }
    Ok(MetaValue::List(values))
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local())
}
