//! Package metadata lookup.
//!
//! The package name comes from `package.json` in the working directory, or
//! from `Cargo.toml` when there is no `package.json`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ChangesetError, Result};

pub const PACKAGE_JSON: &str = "package.json";
pub const CARGO_TOML: &str = "Cargo.toml";

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: String,
}

/// Read the package name from the manifest in `working_dir`.
///
/// # Returns
/// * `Ok(name)` - Name from `package.json`, else from `Cargo.toml`
/// * `Err` - No manifest, unreadable manifest, or a manifest without a name
pub fn read_package_name(working_dir: &Path) -> Result<String> {
    let package_json = working_dir.join(PACKAGE_JSON);
    if package_json.is_file() {
        let manifest: PackageJson = serde_json::from_str(&fs::read_to_string(&package_json)?)?;
        return manifest
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ChangesetError::package(format!("{} has no \"name\" field", package_json.display()))
            });
    }

    let cargo_toml = working_dir.join(CARGO_TOML);
    if cargo_toml.is_file() {
        let manifest: CargoManifest = toml::from_str(&fs::read_to_string(&cargo_toml)?)?;
        return manifest.package.map(|p| p.name).ok_or_else(|| {
            ChangesetError::package(format!("{} has no [package] table", cargo_toml.display()))
        });
    }

    Err(ChangesetError::package(format!(
        "Neither {} nor {} found in {}",
        PACKAGE_JSON,
        CARGO_TOML,
        working_dir.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{ "name": "@acme/components", "version": "0.3.1" }"#,
        )
        .unwrap();

        assert_eq!(read_package_name(dir.path()).unwrap(), "@acme/components");
    }

    #[test]
    fn test_package_json_wins_over_cargo_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), r#"{ "name": "js-name" }"#).unwrap();
        fs::write(dir.path().join(CARGO_TOML), "[package]\nname = \"rs-name\"\n").unwrap();

        assert_eq!(read_package_name(dir.path()).unwrap(), "js-name");
    }

    #[test]
    fn test_falls_back_to_cargo_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CARGO_TOML),
            "[package]\nname = \"rs-name\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();

        assert_eq!(read_package_name(dir.path()).unwrap(), "rs-name");
    }

    #[test]
    fn test_missing_name_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), r#"{ "private": true }"#).unwrap();

        let err = read_package_name(dir.path()).unwrap_err();
        assert!(err.to_string().contains("no \"name\" field"));
    }

    #[test]
    fn test_workspace_manifest_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CARGO_TOML), "[workspace]\nmembers = []\n").unwrap();

        assert!(read_package_name(dir.path()).is_err());
    }

    #[test]
    fn test_no_manifest_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_package_name(dir.path()),
            Err(ChangesetError::Package(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), "{ name: ").unwrap();
        assert!(matches!(
            read_package_name(dir.path()),
            Err(ChangesetError::Json(_))
        ));
    }
}
