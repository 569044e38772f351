//! Catalog file loading
//!
//! An optional `catalog.json` in the platform config directory replaces the
//! built-in body table:
//! - macOS: ~/Library/Application Support/bevysolar/
//! - Linux: ~/.config/bevysolar/
//! - Windows: %APPDATA%\bevysolar\config\

use anyhow::Context;
use bevy::prelude::Resource;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::defaults::default_catalog;
use crate::catalog::types::BodyCatalog;

pub const CATALOG_FILE_NAME: &str = "catalog.json";

/// Where the active catalog came from
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    BuiltIn,
    File(PathBuf),
}

/// Resolve the platform catalog path, if a config directory exists on this platform
pub fn catalog_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bevysolar").map(|dirs| dirs.config_dir().join(CATALOG_FILE_NAME))
}

/// Read and validate a catalog file
pub fn read_catalog_file(path: &Path) -> Result<BodyCatalog, anyhow::Error> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog: BodyCatalog = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;
    catalog
        .validate()
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    Ok(catalog)
}

/// Load the catalog from `path` when the file exists, otherwise use the built-in table.
///
/// A file that exists but cannot be read or validated is an error, not a fallback.
pub fn load_catalog_from(
    path: Option<&Path>,
) -> Result<(BodyCatalog, CatalogSource), anyhow::Error> {
    match path {
        Some(path) if path.exists() => {
            let catalog = read_catalog_file(path)?;
            Ok((catalog, CatalogSource::File(path.to_path_buf())))
        }
        _ => Ok((default_catalog(), CatalogSource::BuiltIn)),
    }
}

/// Load the catalog using the platform config directory
pub fn load_catalog() -> Result<(BodyCatalog, CatalogSource), anyhow::Error> {
    load_catalog_from(catalog_path().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "bevysolar-catalog-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_uses_builtin() {
        let dir = unique_temp_dir("missing");
        let path = dir.join(CATALOG_FILE_NAME);
        let (catalog, source) = load_catalog_from(Some(&path)).unwrap();
        assert_eq!(source, CatalogSource::BuiltIn);
        assert_eq!(catalog, default_catalog());

        let (_, source) = load_catalog_from(None).unwrap();
        assert_eq!(source, CatalogSource::BuiltIn);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_overrides_builtin() {
        let dir = unique_temp_dir("override");
        let path = dir.join(CATALOG_FILE_NAME);
        fs::write(
            &path,
            r##"[
                {"name":"Vulcan","radius":0.5,"orbit_radius":8.0,"color":"#ffaa00","speed":0.05,
                 "description":"hypothetical"}
            ]"##,
        )
        .unwrap();

        let (catalog, source) = load_catalog_from(Some(&path)).unwrap();
        assert_eq!(source, CatalogSource::File(path.clone()));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.bodies()[0].name, "Vulcan");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = unique_temp_dir("invalid");
        let path = dir.join(CATALOG_FILE_NAME);
        fs::write(&path, "[]").unwrap();
        assert!(load_catalog_from(Some(&path)).is_err());

        fs::write(&path, "not json").unwrap();
        assert!(load_catalog_from(Some(&path)).is_err());
        let _ = fs::remove_dir_all(dir);
    }
}
