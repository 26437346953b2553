//! Header descriptors and the providers that contribute them.
//!
//! Plugins and custom annotation tracks add their own fields to the Extra
//! column. They describe those fields through [`HeaderProvider`], and the
//! formatter appends what they report to the description block.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VartabError;
use crate::Result;

/// Comment marker for description header lines.
pub const DESCRIPTION_MARKER: &str = "##";

/// A (field name, description) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderDescriptor {
    pub name: String,
    pub description: String,
}

impl HeaderDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Header line form: `## name : description`.
    pub fn line(&self) -> String {
        format!("{} {} : {}", DESCRIPTION_MARKER, self.name, self.description)
    }
}

/// Anything that contributes described fields to the header block.
pub trait HeaderProvider {
    fn headers(&self) -> Vec<HeaderDescriptor>;
}

/// Header information reported by an annotation plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginHeaders {
    /// Plugin name, for diagnostics
    pub name: String,
    /// Fields the plugin adds, in report order
    #[serde(default)]
    pub headers: Vec<HeaderDescriptor>,
}

impl PluginHeaders {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headers: Vec::new(),
        }
    }

    /// Add one described field.
    pub fn header(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.headers.push(HeaderDescriptor::new(name, description));
        self
    }

    /// Parse plugin headers from a JSON object of `field: description`.
    ///
    /// Fields come out in key order.
    pub fn from_json_str(name: impl Into<String>, text: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let mut plugin = Self::new(name);
        for (field, description) in map {
            let description = match description {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            plugin.headers.push(HeaderDescriptor::new(field, description));
        }
        Ok(plugin)
    }

    /// Load plugin headers from a JSON file.
    pub fn load(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VartabError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(name, &text)
    }
}

impl HeaderProvider for PluginHeaders {
    fn headers(&self) -> Vec<HeaderDescriptor> {
        self.headers.clone()
    }
}

/// How a custom track is matched against variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomKind {
    /// Any overlap with a track feature
    #[default]
    Overlap,
    /// Exact coordinate match
    Exact,
}

impl fmt::Display for CustomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomKind::Overlap => f.write_str("overlap"),
            CustomKind::Exact => f.write_str("exact"),
        }
    }
}

impl FromStr for CustomKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overlap" => Ok(CustomKind::Overlap),
            "exact" => Ok(CustomKind::Exact),
            _ => Err(format!(
                "unknown custom track type '{}' (expected overlap or exact)",
                s
            )),
        }
    }
}

/// A custom annotation track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTrack {
    /// Key the track's annotation appears under in the Extra column
    pub short_name: String,
    /// Source file of the track
    pub file: String,
    #[serde(default, rename = "type")]
    pub kind: CustomKind,
    /// Additional fields reported as `<short_name>_<field>`
    #[serde(default)]
    pub fields: Vec<String>,
}

impl CustomTrack {
    pub fn new(short_name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            file: file.into(),
            kind: CustomKind::default(),
            fields: Vec::new(),
        }
    }

    pub fn kind(mut self, kind: CustomKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Parse a descriptor of the form `SHORT=FILE[:TYPE[:FIELD,...]]`.
    ///
    /// TYPE and FIELD are taken from the right and only when TYPE names a
    /// known kind (or is empty), so a FILE may itself contain `:` as URLs
    /// and drive letters do.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |message: &str| VartabError::InvalidCustomSpec {
            spec: spec.to_string(),
            message: message.to_string(),
        };

        let (short_name, rest) = spec
            .split_once('=')
            .ok_or_else(|| invalid("expected SHORT=FILE"))?;
        let short_name = short_name.trim();
        if short_name.is_empty() {
            return Err(invalid("short name is empty"));
        }

        let (file, kind, fields) = split_target(rest);
        let file = file.trim();
        if file.is_empty() {
            return Err(invalid("file is empty"));
        }

        let mut track = CustomTrack::new(short_name, file).kind(kind);
        if let Some(fields) = fields {
            track.fields = fields
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect();
        }
        Ok(track)
    }
}

/// Split `FILE[:TYPE[:FIELDS]]` into its parts.
fn split_target(rest: &str) -> (&str, CustomKind, Option<&str>) {
    let kind_of = |s: &str| match s.trim() {
        "" => Some(CustomKind::default()),
        kind => kind.parse::<CustomKind>().ok(),
    };

    if let Some((head, fields)) = rest.rsplit_once(':') {
        if let Some((file, kind)) = head.rsplit_once(':') {
            if let Some(kind) = kind_of(kind) {
                return (file, kind, Some(fields));
            }
        }
        if let Some(kind) = kind_of(fields) {
            return (head, kind, None);
        }
    }
    (rest, CustomKind::default(), None)
}

impl HeaderProvider for CustomTrack {
    fn headers(&self) -> Vec<HeaderDescriptor> {
        let mut headers = vec![HeaderDescriptor::new(
            &self.short_name,
            format!("{} ({})", self.file, self.kind),
        )];
        headers.extend(self.fields.iter().map(|field| {
            HeaderDescriptor::new(
                format!("{}_{}", self.short_name, field),
                format!("{} field from {}", field, self.file),
            )
        }));
        headers
    }
}
