//! Factories configured from `.mocksmith.toml`.

use mocksmith::{Config, MockError, MockFactory, ProxyKind, Shape, TypeTag};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(toml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(toml.as_bytes()).expect("write failed");
    file.flush().expect("flush failed");
    file
}

fn sealed_clock() -> Shape {
    Shape::class("Clock")
        .final_method("now", [], TypeTag::I64)
        .build()
        .unwrap()
}

#[test]
fn configured_defaults_reach_created_mocks() {
    let file = write_config(
        r#"
[mock]
mock_final_methods = true

[logging]
level = "debug"
"#,
    );
    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.logging.level, "debug");

    let factory = MockFactory::from_config(&config);
    let handle = factory.create_mock(sealed_clock()).unwrap();
    assert_eq!(handle.proxy_kind(), ProxyKind::Dispatch);
}

#[test]
fn default_config_rejects_sealed_classes() {
    let factory = MockFactory::from_config(&Config::default());
    assert!(matches!(
        factory.create_mock(sealed_clock()),
        Err(MockError::UnsupportedShape(_))
    ));
}

#[test]
fn malformed_config_is_reported() {
    let file = write_config("[mock\nmock_final_methods = ");
    assert!(matches!(
        Config::load_from(file.path()),
        Err(MockError::Config(_))
    ));
}
