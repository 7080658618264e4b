use crate::compiler::StubVersion;

const CLASS_SUFFIX: &str = ".class";
const STUB_SUFFIX: &str = "_Stub";
const SKELETON_SUFFIX: &str = "_Skel";

/// Maps a source file name to the names of the files derived from it.
pub trait FileNameMapper: Send + Sync {
    /// Empty when the file produces nothing.
    fn map_file_name(&self, source: &str) -> Vec<String>;
}

/// rmic naming: `pkg/Foo.class` yields `pkg/Foo_Stub.class`, plus
/// `pkg/Foo_Skel.class` for protocols that still use skeletons.
#[derive(Debug, Clone, Copy, Default)]
pub struct RmiStubMapper {
    version: StubVersion,
}

impl RmiStubMapper {
    pub fn new(version: StubVersion) -> Self {
        Self { version }
    }
}

impl FileNameMapper for RmiStubMapper {
    fn map_file_name(&self, source: &str) -> Vec<String> {
        let Some(base) = source.strip_suffix(CLASS_SUFFIX) else {
            return Vec::new();
        };
        // Already generated output, or an inner class.
        if base.is_empty()
            || base.ends_with(STUB_SUFFIX)
            || base.ends_with(SKELETON_SUFFIX)
            || base.contains('$')
        {
            return Vec::new();
        }

        let mut generated = vec![format!("{base}{STUB_SUFFIX}{CLASS_SUFFIX}")];
        if self.version.generates_skeletons() {
            generated.push(format!("{base}{SKELETON_SUFFIX}{CLASS_SUFFIX}"));
        }
        generated
    }
}
