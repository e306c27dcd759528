//! Integration tests for the manifest API.

use bintool::config::{
    find_project_root, load_project_config, validate, ConfigPaths, ManifestConfig, OriginConfig,
};
use bintool::BintoolError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = r#"
directory: .tools
tools:
  commitsar:
    version: 0.20.1
    origin:
      kind: archive
      url: "https://github.com/aevea/commitsar/releases/download/v{{ version }}/commitsar_{{ version }}_{{ os }}_{{ arch }}{{ archive_extension }}"
      files:
        commitsar: commitsar
    version_cmd: "{{ path }} version"
    os_map: { macos: darwin }
    arch_map: { x86_64: amd64, aarch64: arm64 }
    archive_extension_map: { windows: .zip }
  goimports:
    version: latest
    origin: { kind: go, package: golang.org/x/tools/cmd/goimports }
  nextest:
    version: 0.9.87
    origin: { kind: cargo, package: cargo-nextest }
  jq:
    version: "1.7.1"
    skip_version_check: true
    origin:
      kind: download
      url: "https://github.com/jqlang/jq/releases/download/jq-{{ version }}/jq-{{ os }}-{{ arch }}"
"#;

#[test]
fn public_api_is_accessible() {
    let _config = ManifestConfig::default();
    let _paths = ConfigPaths::discover(Path::new("."));
}

#[test]
fn full_manifest_workflow() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bintool.yml"), MANIFEST).unwrap();

    let config = load_project_config(temp.path(), None).unwrap();
    validate(&config).unwrap();

    let binaries = config.binaries(Some(temp.path().join(".tools").as_path()));
    let summary: Vec<(&str, &str)> = binaries
        .iter()
        .map(|b| (b.name(), b.origin_kind()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("commitsar", "archive"),
            ("goimports", "go"),
            ("jq", "download"),
            ("nextest", "cargo"),
        ]
    );
    assert!(binaries
        .iter()
        .all(|b| b.bin_path().starts_with(temp.path().join(".tools"))));
    assert!(binaries.iter().all(|b| !b.is_installed()));
}

#[test]
fn manifest_mappings_reach_the_template() {
    let config: ManifestConfig = serde_yaml::from_str(MANIFEST).unwrap();
    let commitsar = config.binary("commitsar", None).unwrap();
    let template = commitsar.template();

    if std::env::consts::OS == "macos" {
        assert_eq!(template.os, "darwin");
    }
    if std::env::consts::ARCH == "x86_64" {
        assert_eq!(template.arch, "amd64");
    }
    if std::env::consts::OS == "windows" {
        assert_eq!(template.archive_extension, ".zip");
    } else {
        assert_eq!(template.archive_extension, ".tar.gz");
    }
    assert_eq!(commitsar.directory(), Path::new(".tools"));
}

#[test]
fn hidden_manifest_is_discovered() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".bintool.yml"), MANIFEST).unwrap();
    let nested = temp.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    let root = find_project_root(&nested).unwrap();
    let config = load_project_config(&root, None).unwrap();

    assert_eq!(config.tools.len(), 4);
}

#[test]
fn explicit_manifest_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ci-tools.yml");
    fs::write(&path, MANIFEST).unwrap();

    let config = load_project_config(temp.path(), Some(path.as_path())).unwrap();

    assert_eq!(
        config.tools["goimports"].origin,
        OriginConfig::Go {
            package: "golang.org/x/tools/cmd/goimports".to_string()
        }
    );
}

#[test]
fn invalid_templates_are_caught_before_provisioning() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("bintool.yml"),
        r#"
tools:
  broken:
    version: "1.0.0"
    origin:
      kind: download
      url: "https://example.com/{{ target }}"
"#,
    )
    .unwrap();

    let config = load_project_config(temp.path(), None).unwrap();
    let err = validate(&config).unwrap_err();

    assert!(matches!(err, BintoolError::Config { .. }));
    assert!(err.to_string().contains("target"));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bintool.yml"), "tools:\n  - not a map\n").unwrap();

    let err = load_project_config(temp.path(), None).unwrap_err();

    assert!(matches!(err, BintoolError::ConfigParse { .. }));
}
