//! Starting Kanon from configuration.
//!
//! Tests:
//! - Loading a TOML file that points at a specification on disk
//! - Environment overrides of the engine section
//! - Metrics recorded by validation
//! - Installing the process-wide engine exactly once

use std::fs;

use anyhow::Result;
use kanon::prelude::*;
use kanon::{bootstrap, build_engine, global, BootstrapError};
use kanon_test::{fixtures, MapProps};
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, spec_name: &str, spec: &str, metrics: bool) -> Result<std::path::PathBuf> {
    let spec_path = dir.path().join(spec_name);
    fs::write(&spec_path, spec)?;

    let config_path = dir.path().join("kanon.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[engine]
path_style = "colon"

[spec]
path = "{}"

[telemetry.logging]
enabled = false

[telemetry.metrics]
enabled = {metrics}
"#,
            spec_path.display()
        ),
    )?;
    Ok(config_path)
}

#[test]
fn bootstrap_from_files_and_install_globally() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = write_fixture(&dir, "swagger.json", fixtures::SCENARIO_SPEC, true)?;

    let config = ConfigLoader::new().with_file(&config_path)?.load()?;
    assert_eq!(config.engine.path_style, PathStyle::Colon);

    let engine = bootstrap(&config)?;
    assert!(engine.action("DELETE /item/:id").is_some());

    let mut props = MapProps::new().with("age", "42");
    engine.validate("POST /age", &mut props).unwrap();
    let mut props = MapProps::new();
    engine.validate("GET /nowhere", &mut props).unwrap_err();

    let rendered = kanon::telemetry::render_metrics().unwrap_or_default();
    assert!(rendered.contains("kanon_validations_total"));
    assert!(rendered.contains("kanon_ingestions_total"));
    assert!(!rendered.contains("GET /nowhere"));

    assert!(!global::is_installed());
    let mut props = MapProps::new().with("age", "42");
    assert_eq!(
        global::validate("POST /age", &mut props).unwrap_err().kind,
        ErrorKind::UnknownAction
    );

    let installed = global::install(engine).unwrap();
    assert!(installed.action("POST /age").is_some());
    assert!(global::install(Engine::new()).is_err());

    let mut props = MapProps::new().with("age", "42");
    global::validate("POST /age", &mut props).unwrap();
    assert_eq!(props.value("age"), Some(&Value::Integer(42)));
    Ok(())
}

#[test]
fn yaml_spec_file_with_env_override() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = write_fixture(&dir, "swagger.yaml", fixtures::YAML_SPEC, false)?;

    std::env::set_var("KANON_BOOT_TEST__ENGINE__UNRESOLVED", "reject");
    let config = ConfigLoader::new()
        .with_file(&config_path)?
        .with_env_prefix("KANON_BOOT_TEST")
        .load()?;
    std::env::remove_var("KANON_BOOT_TEST__ENGINE__UNRESOLVED");

    assert_eq!(config.engine.unresolved, UnresolvedPolicy::Reject);

    let engine = build_engine(&config)?;
    let ids: Vec<_> = engine.actions().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["GET /orders"]);
    Ok(())
}

#[test]
fn broken_spec_file_fails_ingestion() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = write_fixture(&dir, "swagger.json", "{ \"paths\": [", false)?;

    let config = ConfigLoader::new().with_file(&config_path)?.load()?;
    let err = build_engine(&config).unwrap_err();
    assert!(matches!(err, BootstrapError::Ingest(_)));
    Ok(())
}
