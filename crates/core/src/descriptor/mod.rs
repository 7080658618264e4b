pub mod handler;
pub mod state;

pub use handler::DescriptorHandler;
pub use state::{DescriptorTag, ParseState};

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{MAIN_SEPARATOR_STR, PathBuf};

/// Jar entry name (`com/example/AccountHome.class`) to the class file on disk.
pub type Manifest = BTreeMap<String, PathBuf>;

/// Classes under these packages ship with the platform and are never bundled.
pub const RESERVED_PREFIXES: [&str; 2] = ["java.", "javax."];

pub const CLASS_FILE_EXTENSION: &str = ".class";

/// Converts a fully qualified class name into its jar entry path, or `None`
/// for platform classes and blank names.
pub fn class_file_path(class_name: &str) -> Option<String> {
    if class_name.is_empty()
        || RESERVED_PREFIXES
            .iter()
            .any(|prefix| class_name.starts_with(prefix))
    {
        return None;
    }
    let mut path = class_name.replace('.', MAIN_SEPARATOR_STR);
    path.push_str(CLASS_FILE_EXTENSION);
    Some(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// A hierarchy tag opened where it cannot start a new level.
    UnexpectedOpen,
    /// A hierarchy tag closed that does not match the current level.
    UnexpectedClose,
}

/// An element that did not fit the `ejb-jar > enterprise-beans > bean` nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureIssue {
    pub kind: IssueKind,
    pub element: String,
    pub state: ParseState,
}

impl StructureIssue {
    pub fn unexpected_open(element: &str, state: ParseState) -> Self {
        Self {
            kind: IssueKind::UnexpectedOpen,
            element: element.to_string(),
            state,
        }
    }

    pub fn unexpected_close(element: &str, state: ParseState) -> Self {
        Self {
            kind: IssueKind::UnexpectedClose,
            element: element.to_string(),
            state,
        }
    }
}

impl std::fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self.kind {
            IssueKind::UnexpectedOpen => "opened",
            IssueKind::UnexpectedClose => "closed",
        };
        write!(f, "<{}> {} while in {:?}", self.element, verb, self.state)
    }
}

/// Everything one parse session hands to the packaging step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DescriptorScan {
    pub files: Manifest,
    pub ejb_name: Option<String>,
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<StructureIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_file_path() {
        let expected = ["com", "example", "AccountHome.class"].join(MAIN_SEPARATOR_STR);
        assert_eq!(
            class_file_path("com.example.AccountHome"),
            Some(expected)
        );
        assert_eq!(class_file_path("Bare"), Some("Bare.class".to_string()));
    }

    #[test]
    fn test_class_file_path_skips_platform_and_blank() {
        assert_eq!(class_file_path("java.rmi.Remote"), None);
        assert_eq!(class_file_path("javax.ejb.EntityBean"), None);
        assert_eq!(class_file_path(""), None);
        // Only the dotted package prefix is reserved.
        assert!(class_file_path("javafx.Thing").is_some());
        assert!(class_file_path("javaxx.Thing").is_some());
    }

    #[test]
    fn test_issue_display() {
        let issue = StructureIssue::unexpected_open("entity", ParseState::InRoot);
        assert_eq!(issue.to_string(), "<entity> opened while in InRoot");
    }
}
