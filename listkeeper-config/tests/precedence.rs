//! Full precedence chain: defaults, discovered files, explicit file, env, overrides

use listkeeper_config::figment::providers::Serialized;
use listkeeper_config::{ConfigProvider, FileDiscovery, SessionStoreKind};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
#[serial]
fn test_each_layer_overrides_the_previous() {
    let global = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let explicit = TempDir::new().unwrap();

    fs::write(
        global.path().join("listkeeper.toml"),
        "host = \"0.0.0.0\"\nport = 1000\ncookie_name = \"global\"\nsession_ttl_secs = 10\n",
    )
    .unwrap();
    fs::write(
        project.path().join("listkeeper.yaml"),
        "port: 2000\ncookie_name: project\nsession_ttl_secs: 20\n",
    )
    .unwrap();
    let explicit_path = explicit.path().join("custom.json");
    fs::write(
        &explicit_path,
        serde_json::json!({ "cookie_name": "explicit", "session_ttl_secs": 30 }).to_string(),
    )
    .unwrap();

    std::env::set_var("LISTKEEPER_SESSION_TTL_SECS", "40");
    std::env::set_var("LISTKEEPER_SESSION_STORE", "file");

    let result = ConfigProvider::new()
        .with_discovery(FileDiscovery::with_directories(vec![
            global.path().to_path_buf(),
            project.path().to_path_buf(),
        ]))
        .with_file(&explicit_path)
        .with_overrides(Serialized::default("port", 3000))
        .load();

    std::env::remove_var("LISTKEEPER_SESSION_TTL_SECS");
    std::env::remove_var("LISTKEEPER_SESSION_STORE");

    let config = result.expect("configuration loads");
    assert_eq!(config.host, "0.0.0.0"); // global file
    assert_eq!(config.cookie_name, "explicit"); // explicit file
    assert_eq!(config.session_ttl_secs, 40); // environment
    assert_eq!(config.session_store, SessionStoreKind::File); // environment
    assert_eq!(config.port, 3000); // command line
}
