//! End-to-end scans of ejb-jar.xml documents

use ejbmanifest_core::descriptor::class_file_path;
use ejbmanifest_core::{DescriptorError, DescriptorScanner, EntityResolver};
use std::path::{MAIN_SEPARATOR_STR, Path};
use std::sync::Arc;
use tempfile::TempDir;

fn scanner() -> DescriptorScanner {
    DescriptorScanner::new("/src", Arc::new(EntityResolver::new()))
}

fn entry(segments: &[&str]) -> String {
    segments.join(MAIN_SEPARATOR_STR)
}

fn account_descriptor(home: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<ejb-jar>
  <enterprise-beans>
    <entity>
      <ejb-name>AccountEJB</ejb-name>
      <home>{home}</home>
      <ejb-class>com.example.AccountBean</ejb-class>
    </entity>
  </enterprise-beans>
</ejb-jar>"#
    )
}

#[test]
fn test_account_entity_bean() {
    let scan = scanner()
        .scan_str(&account_descriptor("com.example.AccountHome"))
        .unwrap();

    let home = entry(&["com", "example", "AccountHome.class"]);
    let bean = entry(&["com", "example", "AccountBean.class"]);
    assert_eq!(scan.files.len(), 2);
    assert_eq!(scan.files[&home], Path::new("/src").join(&home));
    assert_eq!(scan.files[&bean], Path::new("/src").join(&bean));
    assert_eq!(scan.ejb_name.as_deref(), Some("AccountEJB"));
    assert!(scan.issues.is_empty());
}

#[cfg(unix)]
#[test]
fn test_account_entity_bean_literal_paths() {
    let scan = scanner()
        .scan_str(&account_descriptor("com.example.AccountHome"))
        .unwrap();

    let files: Vec<(&str, &Path)> = scan
        .files
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_path()))
        .collect();
    assert_eq!(
        files,
        vec![
            (
                "com/example/AccountBean.class",
                Path::new("/src/com/example/AccountBean.class")
            ),
            (
                "com/example/AccountHome.class",
                Path::new("/src/com/example/AccountHome.class")
            ),
        ]
    );
}

#[test]
fn test_platform_interface_is_not_bundled() {
    let scan = scanner()
        .scan_str(&account_descriptor("java.rmi.Remote"))
        .unwrap();

    assert_eq!(scan.files.len(), 1);
    assert!(
        scan.files
            .contains_key(&entry(&["com", "example", "AccountBean.class"]))
    );
    assert_eq!(scan.ejb_name.as_deref(), Some("AccountEJB"));
}

#[test]
fn test_ejb_ref_inside_bean_is_ignored() {
    let xml = r#"<ejb-jar>
  <enterprise-beans>
    <entity>
      <ejb-name>AccountEJB</ejb-name>
      <ejb-class>com.example.AccountBean</ejb-class>
      <ejb-ref>
        <ejb-ref-name>ejb/Other</ejb-ref-name>
        <home>com.example.Other</home>
      </ejb-ref>
    </entity>
  </enterprise-beans>
</ejb-jar>"#;
    let scan = scanner().scan_str(xml).unwrap();

    assert_eq!(scan.files.len(), 1);
    assert!(
        !scan
            .files
            .contains_key(&class_file_path("com.example.Other").unwrap())
    );
}

#[test]
fn test_all_bean_kinds_and_roles() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<ejb-jar>
  <description>Shop</description>
  <enterprise-beans>
    <session>
      <ejb-name>CartEJB</ejb-name>
      <home>shop.CartHome</home>
      <remote>shop.Cart</remote>
      <local-home>shop.CartLocalHome</local-home>
      <local>shop.CartLocal</local>
      <ejb-class>shop.CartBean</ejb-class>
      <session-type>Stateful</session-type>
    </session>
    <entity>
      <ejb-name>OrderEJB</ejb-name>
      <local-home>shop.OrderLocalHome</local-home>
      <local>shop.OrderLocal</local>
      <ejb-class>shop.OrderBean</ejb-class>
      <prim-key-class>shop.OrderKey</prim-key-class>
    </entity>
    <entity>
      <ejb-name>CustomerEJB</ejb-name>
      <ejb-class>shop.CustomerBean</ejb-class>
      <prim-key-class>java.lang.Integer</prim-key-class>
    </entity>
    <message-driven>
      <ejb-name>AuditMDB</ejb-name>
      <ejb-class>shop.AuditBean</ejb-class>
    </message-driven>
  </enterprise-beans>
  <assembly-descriptor>
    <container-transaction>
      <method>
        <ejb-name>Ignored</ejb-name>
        <method-name>*</method-name>
      </method>
    </container-transaction>
  </assembly-descriptor>
</ejb-jar>"#;
    let scan = scanner().scan_str(xml).unwrap();

    let mut names: Vec<String> = scan.files.keys().cloned().collect();
    names.sort();
    let mut expected: Vec<String> = [
        "shop.AuditBean",
        "shop.Cart",
        "shop.CartBean",
        "shop.CartHome",
        "shop.CartLocal",
        "shop.CartLocalHome",
        "shop.CustomerBean",
        "shop.OrderBean",
        "shop.OrderKey",
        "shop.OrderLocal",
        "shop.OrderLocalHome",
    ]
    .iter()
    .map(|c| class_file_path(c).unwrap())
    .collect();
    expected.sort();
    assert_eq!(names, expected);
    assert_eq!(scan.ejb_name.as_deref(), Some("CartEJB"));
}

#[test]
fn test_entities_and_cdata_in_class_names() {
    let xml = "<ejb-jar><enterprise-beans><session>\
               <ejb-name>A&amp;B</ejb-name>\
               <ejb-class><![CDATA[ com.example.Quoted ]]></ejb-class>\
               <home>com.example.&#72;ome</home>\
               </session></enterprise-beans></ejb-jar>";
    let scan = scanner().scan_str(xml).unwrap();

    assert_eq!(scan.ejb_name.as_deref(), Some("A&B"));
    assert!(
        scan.files
            .contains_key(&class_file_path("com.example.Quoted").unwrap())
    );
    assert!(
        scan.files
            .contains_key(&class_file_path("com.example.Home").unwrap())
    );
}

#[test]
fn test_unexpected_structure_under_extracts() {
    // A bean outside enterprise-beans is skipped; unknown wrappers are transparent.
    let xml = r#"<ejb-jar>
  <entity>
    <ejb-name>Loose</ejb-name>
    <ejb-class>com.example.Loose</ejb-class>
  </entity>
  <enterprise-beans>
    <unknown><session><ejb-class>com.example.Deep</ejb-class></session></unknown>
  </enterprise-beans>
</ejb-jar>"#;
    let scan = scanner().scan_str(xml).unwrap();

    assert!(
        scan.files
            .contains_key(&class_file_path("com.example.Deep").unwrap())
    );
    assert!(
        !scan
            .files
            .contains_key(&class_file_path("com.example.Loose").unwrap())
    );
    assert_eq!(scan.issues.len(), 2);
}

#[test]
fn test_arbitrary_document_yields_nothing() {
    let xml = r#"<project><target name="build"><javac srcdir="src"/></target></project>"#;
    let scan = scanner().scan_str(xml).unwrap();
    assert!(scan.files.is_empty());
    assert_eq!(scan.ejb_name, None);
    assert_eq!(scan.public_id, None);
}

#[test]
fn test_strict_mode_rejects_misplaced_beans() {
    let xml = "<ejb-jar><session><ejb-class>x.Y</ejb-class></session></ejb-jar>";
    let result = scanner().strict(true).scan_str(xml);
    assert!(matches!(result, Err(DescriptorError::Structure(_))));

    let lenient = scanner().scan_str(xml).unwrap();
    assert!(lenient.files.is_empty());
}

#[test]
fn test_malformed_markup_propagates() {
    let result = scanner().scan_str("<ejb-jar><enterprise-beans></ejb-jar>");
    assert!(matches!(result, Err(DescriptorError::Xml(_))));
}

#[test]
fn test_scanner_is_reusable_across_documents() {
    let scanner = scanner();
    let first = scanner
        .scan_str(&account_descriptor("com.example.AccountHome"))
        .unwrap();
    let second = scanner
        .scan_str("<ejb-jar><enterprise-beans><session><ejb-name>Other</ejb-name></session></enterprise-beans></ejb-jar>")
        .unwrap();

    assert_eq!(first.files.len(), 2);
    assert!(second.files.is_empty());
    assert_eq!(second.ejb_name.as_deref(), Some("Other"));
}

#[test]
fn test_scan_file() {
    let temp = TempDir::new().unwrap();
    let descriptor = temp.path().join("ejb-jar.xml");
    std::fs::write(&descriptor, account_descriptor("com.example.AccountHome")).unwrap();

    let classes = temp.path().join("classes");
    let scanner = DescriptorScanner::new(classes.clone(), Arc::new(EntityResolver::new()));
    let scan = scanner.scan_file(&descriptor).unwrap();

    let bean = class_file_path("com.example.AccountBean").unwrap();
    assert_eq!(scan.files[&bean], classes.join(&bean));

    let missing = scanner.scan_file(&temp.path().join("missing.xml"));
    assert!(matches!(missing, Err(DescriptorError::Io(_))));
}

#[test]
fn test_internal_entity_expands_in_class_name() {
    let xml = r#"<?xml version="1.0"?>
<!DOCTYPE ejb-jar [ <!ENTITY pkg "com.example"> ]>
<ejb-jar><enterprise-beans><session>
  <ejb-class>&pkg;.Bean</ejb-class>
</session></enterprise-beans></ejb-jar>"#;
    let scan = scanner().scan_str(xml).unwrap();

    let bean = class_file_path("com.example.Bean").unwrap();
    assert_eq!(scan.files.len(), 1);
    assert_eq!(scan.files[&bean], Path::new("/src").join(&bean));
}

#[test]
fn test_undeclared_entity_fails_scan() {
    let xml = "<ejb-jar><enterprise-beans><session>\
               <ejb-class>&pkg;.Bean</ejb-class>\
               </session></enterprise-beans></ejb-jar>";
    let result = scanner().scan_str(xml);
    assert!(matches!(result, Err(DescriptorError::Xml(_))));
}

#[test]
fn test_latin1_descriptor() {
    let xml: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
<ejb-jar><enterprise-beans><entity>\
<ejb-name>Caf\xE9EJB</ejb-name>\
<ejb-class>com.example.CafeBean</ejb-class>\
</entity></enterprise-beans></ejb-jar>";
    let scan = scanner().scan_reader(xml).unwrap();

    assert_eq!(scan.ejb_name.as_deref(), Some("Caf\u{e9}EJB"));
    assert!(
        scan.files
            .contains_key(&class_file_path("com.example.CafeBean").unwrap())
    );
}
