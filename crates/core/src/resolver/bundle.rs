//! Resources compiled into the crate, addressed by name.

use std::collections::HashMap;
use std::io::Cursor;

pub const EJB_1_1_PUBLIC_ID: &str = "-//Sun Microsystems, Inc.//DTD Enterprise JavaBeans 1.1//EN";
pub const EJB_2_0_PUBLIC_ID: &str = "-//Sun Microsystems, Inc.//DTD Enterprise JavaBeans 2.0//EN";

pub const EJB_1_1_DTD_RESOURCE: &str = "/dtds/ejb-jar_1_1.dtd";
pub const EJB_2_0_DTD_RESOURCE: &str = "/dtds/ejb-jar_2_0.dtd";

/// Public identifiers of the DTDs shipped in [`ResourceBundle::builtin`].
pub const BUILTIN_DTDS: &[(&str, &str)] = &[
    (EJB_1_1_PUBLIC_ID, EJB_1_1_DTD_RESOURCE),
    (EJB_2_0_PUBLIC_ID, EJB_2_0_DTD_RESOURCE),
];

#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    entries: HashMap<String, &'static [u8]>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The deployment descriptor DTDs embedded at build time.
    pub fn builtin() -> Self {
        let mut bundle = Self::new();
        bundle.insert(
            EJB_1_1_DTD_RESOURCE,
            include_bytes!("../../resources/dtds/ejb-jar_1_1.dtd"),
        );
        bundle.insert(
            EJB_2_0_DTD_RESOURCE,
            include_bytes!("../../resources/dtds/ejb-jar_2_0.dtd"),
        );
        bundle
    }

    pub fn insert(&mut self, name: &str, bytes: &'static [u8]) {
        self.entries.insert(normalize(name).to_string(), bytes);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(normalize(name))
    }

    pub fn open(&self, name: &str) -> Option<Cursor<&'static [u8]>> {
        self.entries.get(normalize(name)).map(|bytes| Cursor::new(*bytes))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Names are rooted at the bundle, so `/dtds/x.dtd` and `dtds/x.dtd` are the same entry.
fn normalize(name: &str) -> &str {
    name.trim_start_matches('/')
}
