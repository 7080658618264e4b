//! Scan settings, loadable from a JSON file next to the descriptor sources.

use crate::error::{DescriptorError, Result};
use crate::resolver::EntityResolver;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".ejbmanifest.json";

/// A public identifier and the place its DTD can be read from: a file path,
/// a bundled resource name or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtdMapping {
    pub public_id: String,
    pub location: String,
}

impl DtdMapping {
    /// Parses the `PUBLIC_ID=LOCATION` command-line form. The split happens at
    /// the first `=`, so public identifiers may not contain one.
    pub fn parse(spec: &str) -> Result<Self> {
        let (public_id, location) = spec.split_once('=').ok_or_else(|| {
            DescriptorError::Config(format!("expected PUBLIC_ID=LOCATION, got '{spec}'"))
        })?;
        let mapping = Self {
            public_id: public_id.trim().to_string(),
            location: location.trim().to_string(),
        };
        mapping.validate()?;
        Ok(mapping)
    }

    fn validate(&self) -> Result<()> {
        if self.public_id.is_empty() || self.location.is_empty() {
            return Err(DescriptorError::Config(format!(
                "DTD mapping needs both a public id and a location: '{}' -> '{}'",
                self.public_id, self.location
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory the bean classes are looked up in.
    pub src_dir: PathBuf,
    pub dtds: Vec<DtdMapping>,
    /// Fail on descriptors that stray from the expected element hierarchy.
    pub strict: bool,
    /// Register the EJB 1.1 / 2.0 DTDs shipped with the crate.
    pub builtin_dtds: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("."),
            dtds: Vec::new(),
            strict: false,
            builtin_dtds: true,
        }
    }
}

impl ScanConfig {
    /// Reads a config file. A relative `src_dir` is taken relative to the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: ScanConfig = serde_json::from_str(&content)?;
        if config.src_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.src_dir = parent.join(&config.src_dir);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Loads `.ejbmanifest.json` from `dir` if one exists.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if !candidate.is_file() {
            return Ok(None);
        }
        tracing::debug!("Using scan config {}", candidate.display());
        Self::load(&candidate).map(Some)
    }

    pub fn validate(&self) -> Result<()> {
        self.dtds.iter().try_for_each(DtdMapping::validate)
    }

    /// Builds a resolver with the built-in DTDs (if enabled) followed by every
    /// configured mapping, in file order.
    pub fn build_resolver(&self) -> EntityResolver {
        let mut resolver = EntityResolver::new();
        if self.builtin_dtds {
            resolver = resolver.with_builtin_dtds();
        }
        for mapping in &self.dtds {
            resolver.register(&mapping.public_id, &mapping.location);
        }
        resolver
    }
}
