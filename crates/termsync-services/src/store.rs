use crate::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use termsync_core::TermsyncError;
use termsync_domain::TermRegistry;

/// Registry as found on disk, plus whether a file was actually there.
#[derive(Debug, Clone, Default)]
pub struct LoadedRegistry {
    pub registry: TermRegistry,
    pub found: bool,
}

/// Best-effort registry read used by extraction: absent or unreadable content
/// yields an empty registry at version "0".
pub fn load_registry_or_default(path: &Path) -> LoadedRegistry {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            if e.kind() == ErrorKind::NotFound {
                tracing::info!(event = "registry_missing", path = %path.display(), "terms file not found, a new one will be created");
            } else {
                tracing::warn!(event = "registry_unreadable", path = %path.display(), error = %e);
            }
            return LoadedRegistry::default();
        }
    };
    match serde_json::from_str::<TermRegistry>(&text) {
        Ok(registry) => LoadedRegistry {
            registry,
            found: true,
        },
        Err(e) => {
            tracing::warn!(event = "registry_malformed", path = %path.display(), error = %e, "treating terms file as empty");
            LoadedRegistry::default()
        }
    }
}

/// Strict registry read used by the updater.
pub fn load_registry(path: &Path) -> Result<TermRegistry> {
    let text = fs::read_to_string(path).map_err(|e| TermsyncError::load(path, e))?;
    let registry = serde_json::from_str(&text).map_err(|e| TermsyncError::load(path, e))?;
    Ok(registry)
}

pub fn save_registry(path: &Path, registry: &TermRegistry) -> Result<()> {
    write_json_atomic(path, registry)
}

/// Read a translation file; a missing file is an empty mapping.
pub fn load_translations(path: &Path) -> Result<IndexMap<String, String>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(event = "translations_missing", path = %path.display(), "translation file not found, a new one will be created");
            return Ok(IndexMap::new());
        }
        Err(e) => return Err(TermsyncError::load(path, e).into()),
    };
    let map = serde_json::from_str(&text).map_err(|e| TermsyncError::load(path, e))?;
    Ok(map)
}

pub fn save_translations(path: &Path, translations: &IndexMap<String, String>) -> Result<()> {
    write_json_atomic(path, translations)
}

/// Pretty JSON written to a sibling temp file, then renamed over `path`.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    let tmp = tmp_path(path);
    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use termsync_domain::Term;

    #[test]
    fn missing_registry_defaults_to_version_zero() {
        let dir = tempdir().unwrap();
        let loaded = load_registry_or_default(&dir.path().join("terms.json"));
        assert!(!loaded.found);
        assert_eq!(loaded.registry.version, "0");
        assert!(loaded.registry.terms.is_empty());
    }

    #[test]
    fn malformed_registry_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terms.json");
        fs::write(&path, "{ not json").unwrap();
        let loaded = load_registry_or_default(&path);
        assert!(!loaded.found);
        assert!(load_registry(&path).is_err());
    }

    #[test]
    fn registry_round_trips_through_disk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("terms.json");
        let mut reg = TermRegistry {
            version: "3".into(),
            ..Default::default()
        };
        reg.terms.insert("ok".into(), Term::unchanged("OK", None));
        save_registry(&path, &reg)?;
        assert!(!dir.path().join("nested").join("terms.json.tmp").exists());
        assert_eq!(load_registry(&path)?, reg);
        Ok(())
    }

    #[test]
    fn translations_keep_file_order() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("en.json");
        let mut map = IndexMap::new();
        map.insert("[VERSION]".to_string(), "2".to_string());
        map.insert("zeta".to_string(), "Z".to_string());
        map.insert("alpha".to_string(), "A".to_string());
        save_translations(&path, &map)?;
        let back = load_translations(&path)?;
        let keys: Vec<_> = back.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["[VERSION]", "zeta", "alpha"]);
        assert!(load_translations(&dir.path().join("pt.json"))?.is_empty());
        Ok(())
    }
}
