//! Run configuration: which optional fields and header providers are active.
//!
//! A [`RunConfig`] can be deserialized from a JSON file and then extended
//! programmatically (the CLI layers its flags on top of the file this way).
//!
//! ```json
//! {
//!   "flags": ["symbol", "sift", "hgvs"],
//!   "plugins": [{"name": "CADD", "headers": [{"name": "CADD_PHRED", "description": "..."}]}],
//!   "custom": [{"short_name": "ClinVar", "file": "clinvar.vcf.gz", "type": "exact"}]
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VartabError;
use crate::fields::flags::{is_known_flag, resolve_flag_fields, FieldSource};
use crate::fields::headers::{CustomTrack, HeaderProvider, PluginHeaders};
use crate::Result;

/// Active flags and header providers for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Enabled run flags (names from the flag table; others are ignored)
    pub flags: BTreeSet<String>,
    /// Plugins reporting header information
    pub plugins: Vec<PluginHeaders>,
    /// Custom annotation tracks
    pub custom: Vec<CustomTrack>,
}

impl RunConfig {
    /// Create an empty configuration (default Extra fields only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VartabError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            flags = config.flags.len(),
            plugins = config.plugins.len(),
            custom = config.custom.len(),
            "Loaded run configuration"
        );
        Ok(config)
    }

    /// Enable one flag.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.flags.insert(name.into());
        self
    }

    /// Enable several flags.
    pub fn flags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(names.into_iter().map(Into::into));
        self
    }

    /// Register a plugin's header information.
    pub fn plugin(mut self, plugin: PluginHeaders) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Register a custom annotation track.
    pub fn custom(mut self, track: CustomTrack) -> Self {
        self.custom.push(track);
        self
    }

    pub fn is_enabled(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Header providers in print order: plugins, then custom tracks.
    pub fn header_providers(&self) -> Vec<Box<dyn HeaderProvider + Send + Sync>> {
        let plugins = self
            .plugins
            .iter()
            .map(|p| Box::new(p.clone()) as Box<dyn HeaderProvider + Send + Sync>);
        let custom = self
            .custom
            .iter()
            .map(|c| Box::new(c.clone()) as Box<dyn HeaderProvider + Send + Sync>);
        plugins.chain(custom).collect()
    }
}

impl FieldSource for RunConfig {
    fn extra_fields(&self) -> Vec<String> {
        for flag in self.flags.iter().filter(|f| !is_known_flag(f)) {
            debug!(flag = %flag, "Flag enables no Extra fields");
        }
        resolve_flag_fields(|flag| self.is_enabled(flag))
    }
}
