use crate::error::CompilerResult;
use crate::mapper::FileNameMapper;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Wire protocol of the generated stubs, matching rmic's `-v1.1`, `-v1.2`
/// and `-vcompat` switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StubVersion {
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "1.2")]
    V1_2,
    #[default]
    Compat,
}

impl StubVersion {
    /// Whether this protocol needs server-side skeleton classes.
    pub fn generates_skeletons(&self) -> bool {
        matches!(self, StubVersion::V1_1 | StubVersion::Compat)
    }

    pub fn flag(&self) -> &'static str {
        match self {
            StubVersion::V1_1 => "-v1.1",
            StubVersion::V1_2 => "-v1.2",
            StubVersion::Compat => "-vcompat",
        }
    }
}

/// Settings a build task hands to whichever compiler it selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskSettings {
    /// Root of the compiled classes; generated stubs land here too.
    pub base_dir: PathBuf,
    /// Fully qualified names of the remote implementation classes.
    pub classes: Vec<String>,
    pub classpath: Vec<PathBuf>,
    pub stub_version: StubVersion,
    pub extra_args: Vec<String>,
}

impl TaskSettings {
    /// Classpath the compiler runs with: the class root first, then the
    /// configured entries without duplicates.
    pub fn compile_classpath(&self) -> Vec<PathBuf> {
        let mut entries = vec![self.base_dir.clone()];
        for entry in &self.classpath {
            if !entries.contains(entry) {
                entries.push(entry.clone());
            }
        }
        entries
    }
}

/// A pluggable RMI stub generator.
pub trait StubCompiler: Send {
    fn configure(&mut self, settings: &TaskSettings) -> CompilerResult<()>;

    /// Runs the compiler; `Ok(false)` means it ran and reported failure.
    fn execute(&mut self) -> CompilerResult<bool>;

    /// Maps a source class file to the files this compiler generates for it.
    fn mapper(&self) -> &dyn FileNameMapper;

    fn classpath(&self) -> CompilerResult<Vec<PathBuf>>;
}
