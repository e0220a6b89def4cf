//! End-to-end tests for the resource configuration flow
//!
//! Exercises the complete path: definitions file -> validation ->
//! settings mapping -> shared resources.ini.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use res_ini::Document;
use res_sync::{ResourceStore, ResourceSyncer, load_definitions};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/definitions")
        .join(name)
}

#[test]
fn test_fixture_definitions_reach_the_resources_file() {
    let definitions = load_definitions(&fixture("resources.toml")).unwrap();
    assert_eq!(definitions.len(), 3);

    let temp = TempDir::new().unwrap();
    let ini_path = temp.path().join("resources.ini");
    let store = ResourceStore::new(&ini_path);

    let applied = ResourceSyncer::new().sync(&store, &definitions).unwrap();
    assert_eq!(applied, vec!["directory", "elasticdb", "securedb"]);

    let document = Document::parse(&fs::read_to_string(&ini_path).unwrap()).unwrap();

    let elasticdb = document.section("resource-elasticdb").unwrap();
    let elasticdb_settings = elasticdb.settings();
    let entries: Vec<(&str, &str)> = elasticdb_settings.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("type", "db"),
            ("db", "mysql"),
            ("host", "localhost"),
            ("port", "3306"),
            ("dbname", "foo"),
            ("username", "bar"),
            ("password", "secret"),
        ]
    );

    let securedb = document.section("resource-securedb").unwrap();
    assert_eq!(securedb.get("use_ssl"), Some("true"));
    assert_eq!(securedb.get("ssl_cert"), Some("/etc/ssl/client.pem"));
    assert_eq!(securedb.get("ssl_cipher"), Some("MY-CIPHER"));

    // What landed in the file is exactly the mapped settings.
    let expected = definitions.resources["securedb"]
        .validate()
        .unwrap()
        .to_settings();
    assert_eq!(securedb.settings(), expected);

    let directory = document.section("resource-directory").unwrap();
    assert_eq!(directory.get("hostname"), Some("ldap.example.org"));
    assert_eq!(directory.get("encryption"), Some("starttls"));
}

#[test]
fn test_resync_is_idempotent() {
    let definitions = load_definitions(&fixture("resources.toml")).unwrap();

    let temp = TempDir::new().unwrap();
    let ini_path = temp.path().join("resources.ini");
    let store = ResourceStore::new(&ini_path);
    let syncer = ResourceSyncer::new();

    syncer.sync(&store, &definitions).unwrap();
    let first = fs::read_to_string(&ini_path).unwrap();

    syncer.sync(&store, &definitions).unwrap();
    let second = fs::read_to_string(&ini_path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sync_keeps_unmanaged_configuration() {
    let temp = TempDir::new().unwrap();
    let ini_path = temp.path().join("resources.ini");
    fs::write(
        &ini_path,
        "# managed by the console installer\n[module-monitoring]\nbackend = \"local\"\n",
    )
    .unwrap();

    let definitions = load_definitions(&fixture("resources.toml")).unwrap();
    let store = ResourceStore::new(&ini_path);
    ResourceSyncer::new().sync(&store, &definitions).unwrap();

    let content = fs::read_to_string(&ini_path).unwrap();
    assert!(content.contains("# managed by the console installer"));
    assert!(content.contains("[module-monitoring]"));
    assert!(content.contains("backend = \"local\""));

    // Managed sections land after the pre-existing content.
    let document = Document::parse(&content).unwrap();
    let names: Vec<&str> = document.section_names().collect();
    assert_eq!(
        names,
        vec![
            "module-monitoring",
            "resource-directory",
            "resource-elasticdb",
            "resource-securedb",
        ]
    );
}

#[test]
fn test_invalid_definition_file_leaves_no_trace() {
    let temp = TempDir::new().unwrap();
    let definitions_path = temp.path().join("resources.toml");
    fs::write(
        &definitions_path,
        "[resources.broken]\ntype = \"foobar\"\nhost = \"localhost\"\nport = 3306\n",
    )
    .unwrap();

    let definitions = load_definitions(&definitions_path).unwrap();
    let ini_path = temp.path().join("resources.ini");
    let store = ResourceStore::new(&ini_path);

    let err = ResourceSyncer::new().sync(&store, &definitions).unwrap_err();
    assert!(err.to_string().contains("expected one of"), "{err}");
    assert!(!ini_path.exists());
}

#[test]
fn test_removed_resource_disappears_from_file() {
    let definitions = load_definitions(&fixture("resources.toml")).unwrap();

    let temp = TempDir::new().unwrap();
    let ini_path = temp.path().join("resources.ini");
    let store = ResourceStore::new(&ini_path);
    ResourceSyncer::new().sync(&store, &definitions).unwrap();

    assert!(store.remove("elasticdb").unwrap());

    let content = fs::read_to_string(&ini_path).unwrap();
    assert!(!content.contains("[resource-elasticdb]"));
    assert!(content.contains("[resource-directory]"));
    assert_eq!(store.names().unwrap(), vec!["directory", "securedb"]);
}
