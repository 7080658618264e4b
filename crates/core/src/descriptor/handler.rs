use super::state::{DescriptorTag, ParseState};
use super::{DescriptorScan, Manifest, StructureIssue, class_file_path};
use crate::parser::SaxHandler;
use crate::resolver::{EntityResolver, EntitySource};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Event transducer over an `ejb-jar.xml` document.
///
/// Builds the map of jar entry name to class file under `src_dir` for every
/// home, remote, local, local-home, bean and primary-key class named inside a
/// session, entity or message-driven bean, and remembers the first `ejb-name`.
/// Documents that stray from the expected hierarchy are tolerated; they just
/// yield fewer entries.
pub struct DescriptorHandler {
    src_dir: PathBuf,
    resolver: Arc<EntityResolver>,
    state: ParseState,
    current_element: String,
    current_text: String,
    in_ejb_ref: bool,
    files: Manifest,
    ejb_name: Option<String>,
    public_id: Option<String>,
    issues: Vec<StructureIssue>,
}

impl DescriptorHandler {
    pub fn new(src_dir: impl Into<PathBuf>, resolver: Arc<EntityResolver>) -> Self {
        Self {
            src_dir: src_dir.into(),
            resolver,
            state: ParseState::SeekingRoot,
            current_element: String::new(),
            current_text: String::new(),
            in_ejb_ref: false,
            files: Manifest::new(),
            ejb_name: None,
            public_id: None,
            issues: Vec::new(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Jar entry name to source file, empty until a document has been started.
    pub fn manifest(&self) -> &Manifest {
        &self.files
    }

    pub fn ejb_name(&self) -> Option<&str> {
        self.ejb_name.as_deref()
    }

    /// Public identifier most recently passed to entity resolution.
    pub fn last_public_id(&self) -> Option<&str> {
        self.public_id.as_deref()
    }

    /// Elements that did not fit the expected hierarchy during this session.
    pub fn issues(&self) -> &[StructureIssue] {
        &self.issues
    }

    pub fn into_scan(self) -> DescriptorScan {
        DescriptorScan {
            files: self.files,
            ejb_name: self.ejb_name,
            public_id: self.public_id,
            issues: self.issues,
        }
    }

    /// Location of a jar entry under `src_dir`. Root and prefix components a
    /// malformed class name may produce (`.Foo` becomes `/Foo.class`) are
    /// dropped so the result never leaves `src_dir`.
    fn class_file(&self, entry: &str) -> PathBuf {
        let mut path = self.src_dir.clone();
        path.extend(
            Path::new(entry)
                .components()
                .filter(|c| matches!(c, Component::Normal(_))),
        );
        path
    }

    /// Runs on every element close, before the state pops, so the state seen
    /// here is the one the closing element lived in.
    fn process_element(&mut self) {
        if self.in_ejb_ref || !self.state.is_bean() {
            return;
        }
        let Some(tag) = DescriptorTag::from_name(&self.current_element) else {
            return;
        };

        if tag.is_class_role() {
            if let Some(entry) = class_file_path(self.current_text.trim()) {
                let class_file = self.class_file(&entry);
                self.files.insert(entry, class_file);
            }
        } else if tag == DescriptorTag::EjbName && self.ejb_name.is_none() {
            self.ejb_name = Some(self.current_text.trim().to_string());
        }
    }
}

impl SaxHandler for DescriptorHandler {
    fn on_document_start(&mut self) {
        self.state = ParseState::SeekingRoot;
        self.current_element.clear();
        self.current_text.clear();
        self.in_ejb_ref = false;
        self.files = Manifest::new();
        self.ejb_name = None;
        self.public_id = None;
        self.issues.clear();
    }

    fn on_element_start(&mut self, name: &str, _attributes: &[(String, String)]) {
        self.current_element.clear();
        self.current_element.push_str(name);
        self.current_text.clear();

        match DescriptorTag::from_name(name) {
            Some(DescriptorTag::EjbRef) => self.in_ejb_ref = true,
            Some(tag) => match self.state.enter(tag) {
                Some(next) => self.state = next,
                None if tag.is_structural() => {
                    self.issues.push(StructureIssue::unexpected_open(name, self.state));
                }
                None => {}
            },
            None => {}
        }
    }

    fn on_characters(&mut self, chunk: &str) {
        self.current_text.push_str(chunk);
    }

    fn on_element_end(&mut self, name: &str) {
        self.process_element();
        self.current_text.clear();
        self.current_element.clear();

        match DescriptorTag::from_name(name) {
            Some(DescriptorTag::EjbRef) => self.in_ejb_ref = false,
            Some(tag) => match self.state.leave(tag) {
                Some(previous) => self.state = previous,
                None if tag.is_structural() => {
                    self.issues.push(StructureIssue::unexpected_close(name, self.state));
                }
                None => {}
            },
            None => {}
        }
    }

    fn on_document_end(&mut self) {
        tracing::debug!(
            "Descriptor yielded {} class files (ejb-name: {})",
            self.files.len(),
            self.ejb_name.as_deref().unwrap_or("<none>")
        );
    }

    fn resolve_entity(
        &mut self,
        public_id: Option<&str>,
        system_id: &str,
    ) -> Option<EntitySource> {
        self.public_id = public_id.map(str::to_string);
        self.resolver.resolve(public_id, system_id)
    }
}
