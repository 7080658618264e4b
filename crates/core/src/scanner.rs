use crate::config::ScanConfig;
use crate::descriptor::{DescriptorHandler, DescriptorScan};
use crate::error::{DescriptorError, Result};
use crate::parser;
use crate::resolver::EntityResolver;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs complete parse sessions over descriptors sharing one resolver.
#[derive(Clone)]
pub struct DescriptorScanner {
    src_dir: PathBuf,
    resolver: Arc<EntityResolver>,
    strict: bool,
}

impl DescriptorScanner {
    pub fn new(src_dir: impl Into<PathBuf>, resolver: Arc<EntityResolver>) -> Self {
        Self {
            src_dir: src_dir.into(),
            resolver,
            strict: false,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.src_dir.clone(), Arc::new(config.build_resolver())).strict(config.strict)
    }

    /// In strict mode a descriptor whose hierarchy tags are out of place is
    /// rejected instead of silently yielding fewer entries.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn scan_file(&self, path: &Path) -> Result<DescriptorScan> {
        tracing::debug!("Scanning descriptor {}", path.display());
        let mut handler = self.handler();
        parser::parse_file(path, &mut handler)?;
        self.finish(handler)
    }

    pub fn scan_reader<R: BufRead>(&self, source: R) -> Result<DescriptorScan> {
        let mut handler = self.handler();
        parser::parse_descriptor(source, &mut handler)?;
        self.finish(handler)
    }

    pub fn scan_str(&self, xml: &str) -> Result<DescriptorScan> {
        self.scan_reader(xml.as_bytes())
    }

    fn handler(&self) -> DescriptorHandler {
        DescriptorHandler::new(self.src_dir.clone(), Arc::clone(&self.resolver))
    }

    fn finish(&self, handler: DescriptorHandler) -> Result<DescriptorScan> {
        let scan = handler.into_scan();
        if let Some(issue) = scan.issues.first() {
            if self.strict {
                return Err(DescriptorError::Structure(format!(
                    "{issue} ({} issue(s) in total)",
                    scan.issues.len()
                )));
            }
            tracing::debug!("Ignoring {} structure issue(s), first: {}", scan.issues.len(), issue);
        }
        Ok(scan)
    }
}
