//! Header-block data structures.
//!
//! [`DescriptionBlock`] is the description section in structured form, ready
//! to be printed as `##` lines or serialized to JSON. [`RunInfo`] carries the
//! run provenance printed ahead of it.

use serde::Serialize;

use crate::fields::headers::{HeaderDescriptor, DESCRIPTION_MARKER};

/// Section marker introducing fixed column descriptions.
pub const COLUMN_SECTION: &str = "Column descriptions:";

/// Section marker introducing Extra key descriptions.
pub const EXTRA_SECTION: &str = "Extra column keys:";

/// Described fields, grouped by header section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionBlock {
    /// Fixed columns, in display order
    pub columns: Vec<HeaderDescriptor>,
    /// Extra candidates, in rank order
    pub extra: Vec<HeaderDescriptor>,
    /// Plugin then custom-track fields, as the providers report them
    pub providers: Vec<HeaderDescriptor>,
}

impl DescriptionBlock {
    /// Render as `##` comment lines, section markers included.
    pub fn lines(&self) -> Vec<String> {
        let mut lines =
            Vec::with_capacity(self.columns.len() + self.extra.len() + self.providers.len() + 2);
        lines.push(section_line(COLUMN_SECTION));
        lines.extend(self.columns.iter().map(HeaderDescriptor::line));
        lines.push(section_line(EXTRA_SECTION));
        lines.extend(self.extra.iter().map(HeaderDescriptor::line));
        lines.extend(self.providers.iter().map(HeaderDescriptor::line));
        lines
    }
}

fn section_line(title: &str) -> String {
    format!("{} {}", DESCRIPTION_MARKER, title)
}

/// Provenance printed at the top of the header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunInfo {
    /// Tool banner (e.g. "VARTAB v0.3.0")
    pub banner: String,
    /// Timestamp of the run, already formatted by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produced_at: Option<String>,
    /// Further `key : value` provenance (cache, database versions, ...)
    pub entries: Vec<(String, String)>,
}

impl RunInfo {
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
            produced_at: None,
            entries: Vec::new(),
        }
    }

    pub fn produced_at(mut self, timestamp: impl Into<String>) -> Self {
        self.produced_at = Some(timestamp.into());
        self
    }

    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Render as `##` comment lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![section_line(&self.banner)];
        if let Some(ts) = &self.produced_at {
            lines.push(format!("{} Output produced at {}", DESCRIPTION_MARKER, ts));
        }
        lines.extend(
            self.entries
                .iter()
                .map(|(key, value)| format!("{} {} : {}", DESCRIPTION_MARKER, key, value)),
        );
        lines
    }
}
