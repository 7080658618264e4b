//! Public-identifier cache used to resolve the DTD named by a descriptor's DOCTYPE.
//!
//! Each `register` call places an identifier in exactly one tier, chosen by
//! where the location exists at registration time: local file, bundled
//! resource, then URL. `resolve` walks the tiers in the same order and returns
//! the first stream that opens, so a stale file registration falls through to
//! a resource or URL registered for the same identifier by a later call.

pub mod bundle;
pub mod fetch;

pub use bundle::{BUILTIN_DTDS, ResourceBundle};
pub use fetch::{HttpFetcher, RemoteFetcher};

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionTier {
    LocalFile,
    Resource,
    Url,
}

/// Where a resolved entity is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOrigin {
    LocalFile(PathBuf),
    Resource(String),
    Url(Url),
}

impl EntityOrigin {
    pub fn tier(&self) -> ResolutionTier {
        match self {
            EntityOrigin::LocalFile(_) => ResolutionTier::LocalFile,
            EntityOrigin::Resource(_) => ResolutionTier::Resource,
            EntityOrigin::Url(_) => ResolutionTier::Url,
        }
    }
}

impl fmt::Display for EntityOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityOrigin::LocalFile(path) => write!(f, "local file {}", path.display()),
            EntityOrigin::Resource(name) => write!(f, "local resource {name}"),
            EntityOrigin::Url(url) => write!(f, "url {url}"),
        }
    }
}

/// Byte source handed back to the parser for an external entity.
pub struct EntitySource {
    origin: EntityOrigin,
    reader: Box<dyn Read + Send>,
}

impl EntitySource {
    pub fn new(origin: EntityOrigin, reader: impl Read + Send + 'static) -> Self {
        Self {
            origin,
            reader: Box::new(reader),
        }
    }

    pub fn origin(&self) -> &EntityOrigin {
        &self.origin
    }

    pub fn into_string(mut self) -> io::Result<String> {
        let mut content = String::new();
        self.reader.read_to_string(&mut content)?;
        Ok(content)
    }
}

impl Read for EntitySource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for EntitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySource")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

pub struct EntityResolver {
    file_dtds: HashMap<String, PathBuf>,
    resource_dtds: HashMap<String, String>,
    url_dtds: HashMap<String, Url>,
    resources: ResourceBundle,
    fetcher: Box<dyn RemoteFetcher>,
}

impl Default for EntityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityResolver {
    /// Resolver over the built-in resource bundle with no registrations.
    pub fn new() -> Self {
        Self::with_parts(ResourceBundle::builtin(), Box::new(HttpFetcher::default()))
    }

    pub fn with_parts(resources: ResourceBundle, fetcher: Box<dyn RemoteFetcher>) -> Self {
        Self {
            file_dtds: HashMap::new(),
            resource_dtds: HashMap::new(),
            url_dtds: HashMap::new(),
            resources,
            fetcher,
        }
    }

    /// Registers the public identifiers of every DTD in [`BUILTIN_DTDS`].
    pub fn with_builtin_dtds(mut self) -> Self {
        for (public_id, resource) in BUILTIN_DTDS {
            self.register(public_id, resource);
        }
        self
    }

    pub fn register(&mut self, public_id: &str, location: &str) {
        if location.is_empty() {
            return;
        }

        let path = Path::new(location);
        if path.is_file() {
            if !public_id.is_empty() {
                tracing::debug!("Mapped publicId {} to file {}", public_id, path.display());
                self.file_dtds
                    .insert(public_id.to_string(), path.to_path_buf());
            }
            return;
        }

        if self.resources.contains(location) {
            if !public_id.is_empty() {
                tracing::debug!("Mapped publicId {} to resource {}", public_id, location);
                self.resource_dtds
                    .insert(public_id.to_string(), location.to_string());
            }
            return;
        }

        // Anything left must at least be an absolute URL; relative or garbled
        // locations are dropped without a trace.
        if let Ok(url) = Url::parse(location) {
            if !public_id.is_empty() {
                tracing::debug!("Mapped publicId {} to url {}", public_id, url);
                self.url_dtds.insert(public_id.to_string(), url);
            }
        }
    }

    pub fn resolve(&self, public_id: Option<&str>, system_id: &str) -> Option<EntitySource> {
        if let Some(id) = public_id {
            if let Some(source) = self.resolve_registered(id) {
                tracing::debug!("Resolved {} to {}", id, source.origin());
                return Some(source);
            }
        }

        tracing::info!(
            "Could not resolve ( publicId: {}, systemId: {}) to a local entity",
            public_id.unwrap_or("null"),
            system_id
        );
        None
    }

    fn resolve_registered(&self, public_id: &str) -> Option<EntitySource> {
        if let Some(path) = self.file_dtds.get(public_id) {
            match File::open(path) {
                Ok(file) => {
                    return Some(EntitySource::new(
                        EntityOrigin::LocalFile(path.clone()),
                        file,
                    ));
                }
                Err(e) => tracing::trace!("Registered file {} unreadable: {}", path.display(), e),
            }
        }

        if let Some(name) = self.resource_dtds.get(public_id) {
            if let Some(stream) = self.resources.open(name) {
                return Some(EntitySource::new(
                    EntityOrigin::Resource(name.clone()),
                    stream,
                ));
            }
        }

        if let Some(url) = self.url_dtds.get(public_id) {
            match self.fetcher.open(url) {
                Ok(stream) => {
                    return Some(EntitySource::new(EntityOrigin::Url(url.clone()), stream));
                }
                Err(e) => tracing::trace!("Registered url {} unreachable: {}", url, e),
            }
        }

        None
    }

    /// Tiers holding an entry for `public_id`, in resolution order.
    pub fn registered_tiers(&self, public_id: &str) -> Vec<ResolutionTier> {
        let mut tiers = Vec::new();
        if self.file_dtds.contains_key(public_id) {
            tiers.push(ResolutionTier::LocalFile);
        }
        if self.resource_dtds.contains_key(public_id) {
            tiers.push(ResolutionTier::Resource);
        }
        if self.url_dtds.contains_key(public_id) {
            tiers.push(ResolutionTier::Url);
        }
        tiers
    }

    pub fn is_empty(&self) -> bool {
        self.file_dtds.is_empty() && self.resource_dtds.is_empty() && self.url_dtds.is_empty()
    }
}
