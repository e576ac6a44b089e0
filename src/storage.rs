use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Reads a whole JSON document, falling back to `T::default()` when the file
/// does not exist yet.
pub fn load_or_default<T>(path: &Path) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).map_err(|e| {
            AppError::JsonError(format!("Failed to parse {}: {}", path.display(), e))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no document yet, using defaults");
            Ok(T::default())
        }
        Err(e) => Err(AppError::Persistence(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Writes a whole JSON document: temp file, fsync, then rename over the target.
pub fn save_atomic<T>(path: &Path, value: &T) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Persistence(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::JsonError(format!("Failed to serialize {}: {}", path.display(), e))
    })?;

    let tmp_path = path.with_extension("json.tmp");
    let write_err =
        |e: std::io::Error| AppError::Persistence(format!("Failed to write {}: {}", path.display(), e));
    {
        let mut file = File::create(&tmp_path).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
    }

    fs::rename(&tmp_path, path).map_err(write_err)?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "saved document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let loaded: Vec<String> = load_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_replaces_document_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("doc.json");

        let mut doc = BTreeMap::new();
        doc.insert("ana".to_string(), 2u64);
        save_atomic(&path, &doc).unwrap();
        doc.insert("moira".to_string(), 1u64);
        save_atomic(&path, &doc).unwrap();

        let loaded: BTreeMap<String, u64> = load_or_default(&path).unwrap();
        assert_eq!(loaded, doc);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_document_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Vec<String>, _> = load_or_default(&path);
        assert!(matches!(result, Err(AppError::JsonError(_))));
    }
}
