use std::collections::HashMap;

const ENTITY_DECL: &str = "<!ENTITY";

/// External identifiers of a `<!DOCTYPE …>` declaration plus the general
/// entities its internal subset declares.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocTypeDecl {
    pub name: String,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
    /// Internal general entities with a literal value, first declaration wins.
    pub entities: HashMap<String, String>,
}

impl DocTypeDecl {
    /// Parses the content quick-xml reports for a DOCTYPE event, i.e. everything
    /// between `<!DOCTYPE` and the closing `>`.
    ///
    /// `ejb-jar PUBLIC "-//Sun Microsystems, Inc.//DTD Enterprise JavaBeans 2.0//EN" "http://java.sun.com/dtd/ejb-jar_2_0.dtd"`
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let name_end = trimmed
            .find(|c: char| c.is_whitespace() || c == '[')
            .unwrap_or(trimmed.len());
        let name = trimmed[..name_end].to_string();
        let mut rest = trimmed[name_end..].trim_start();

        let mut decl = DocTypeDecl {
            name,
            ..Default::default()
        };

        if let Some(after) = rest.strip_prefix("SYSTEM") {
            let (system, remaining) = quoted(after.trim_start());
            decl.system_id = system;
            rest = remaining;
        } else if let Some(after) = rest.strip_prefix("PUBLIC") {
            let (public, remaining) = quoted(after.trim_start());
            decl.public_id = public;
            let (system, remaining) = quoted(remaining.trim_start());
            decl.system_id = system;
            rest = remaining;
        }

        if let Some(subset) = rest.trim_start().strip_prefix('[') {
            decl.entities = internal_entities(subset);
        }

        decl
    }

    /// Whether the declaration points at an external subset the parser must load.
    pub fn has_external_subset(&self) -> bool {
        self.system_id.is_some()
    }
}

/// Collects `<!ENTITY name "value">` declarations. Parameter entities and
/// external (SYSTEM / PUBLIC) entities are skipped.
fn internal_entities(subset: &str) -> HashMap<String, String> {
    let mut entities = HashMap::new();
    let mut rest = subset;
    while let Some(start) = rest.find(ENTITY_DECL) {
        let after = rest[start + ENTITY_DECL.len()..].trim_start();
        rest = after;
        if after.starts_with('%') {
            continue;
        }
        let name_end = after
            .find(char::is_whitespace)
            .unwrap_or(after.len());
        let (value, remaining) = quoted(after[name_end..].trim_start());
        if let Some(value) = value {
            entities
                .entry(after[..name_end].to_string())
                .or_insert(value);
            rest = remaining;
        }
    }
    entities
}

/// Splits a leading `"…"` or `'…'` literal off `input`.
fn quoted(input: &str) -> (Option<String>, &str) {
    let mut chars = input.chars();
    let Some(quote) = chars.next().filter(|c| *c == '"' || *c == '\'') else {
        return (None, input);
    };
    let body = &input[1..];
    match body.find(quote) {
        Some(end) => (Some(body[..end].to_string()), &body[end + 1..]),
        None => (None, input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_public_doctype() {
        let decl = DocTypeDecl::parse(
            r#" ejb-jar PUBLIC "-//Sun Microsystems, Inc.//DTD Enterprise JavaBeans 1.1//EN" "http://java.sun.com/j2ee/dtds/ejb-jar_1_1.dtd""#,
        );
        assert_eq!(decl.name, "ejb-jar");
        assert_eq!(
            decl.public_id.as_deref(),
            Some("-//Sun Microsystems, Inc.//DTD Enterprise JavaBeans 1.1//EN")
        );
        assert_eq!(
            decl.system_id.as_deref(),
            Some("http://java.sun.com/j2ee/dtds/ejb-jar_1_1.dtd")
        );
        assert!(decl.has_external_subset());
    }

    #[test]
    fn test_parse_system_doctype_with_single_quotes() {
        let decl = DocTypeDecl::parse("ejb-jar SYSTEM 'ejb-jar.dtd'");
        assert_eq!(decl.public_id, None);
        assert_eq!(decl.system_id.as_deref(), Some("ejb-jar.dtd"));
    }

    #[test]
    fn test_parse_internal_subset_only() {
        let decl = DocTypeDecl::parse(r#"ejb-jar [ <!ENTITY x "v"> ]"#);
        assert_eq!(decl.name, "ejb-jar");
        assert!(!decl.has_external_subset());
        assert_eq!(decl.entities.get("x").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_internal_subset_after_external_id() {
        let decl = DocTypeDecl::parse(
            r#"ejb-jar SYSTEM "ejb-jar.dtd" [
  <!ENTITY pkg 'com.example'>
  <!ENTITY pkg "ignored">
  <!ENTITY % param "p">
  <!ENTITY logo SYSTEM "logo.gif">
]"#,
        );
        assert_eq!(decl.system_id.as_deref(), Some("ejb-jar.dtd"));
        assert_eq!(decl.entities.len(), 1);
        assert_eq!(decl.entities["pkg"], "com.example");
    }

    #[test]
    fn test_unterminated_literal_is_ignored() {
        let decl = DocTypeDecl::parse(r#"ejb-jar PUBLIC "-//broken"#);
        assert_eq!(decl.public_id, None);
        assert_eq!(decl.system_id, None);
    }
}
