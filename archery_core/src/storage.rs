//! # Configuration Store
//!
//! Saved configurations live in a single JSON file:
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "saved_at": "2026-10-19T12:00:00Z",
//!   "configurations": [ { "id": "...", "name": "New Setup", ... } ]
//! }
//! ```
//!
//! Two layers:
//!
//! - [`save_configurations`] / [`load_configurations`] return every failure
//!   as a [`CalcError`].
//! - [`ConfigStore`] never fails: it logs problems and falls back to an
//!   empty list or a skipped save.
//!
//! Every save overwrites the whole list. Saves write to a `.tmp` file,
//! fsync, then rename over the store, all while holding an exclusive OS
//! lock on a `.lock` sidecar so only one writer runs at a time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use archery_core::configuration::{create_default_configuration, generate_id};
//! use archery_core::storage::ConfigStore;
//!
//! let store = ConfigStore::new("configurations.json");
//! let config = create_default_configuration().build(generate_id())?;
//! store.upsert(config);
//! assert_eq!(store.load().len(), 1);
//! # Ok::<(), archery_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::configuration::ArrowConfiguration;
use crate::errors::{CalcError, CalcResult};

/// Current schema version of the store file
pub const STORE_SCHEMA_VERSION: &str = "0.1.0";

/// On-disk layout of the store file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub configurations: Vec<ArrowConfiguration>,
}

impl StoreFile {
    fn new(configurations: Vec<ArrowConfiguration>) -> Self {
        StoreFile {
            version: STORE_SCHEMA_VERSION.to_string(),
            saved_at: Utc::now(),
            configurations,
        }
    }
}

/// Exclusive writer lock on the store's `.lock` sidecar.
///
/// Blocks until the lock is free. Released on drop; the sidecar file is
/// left in place.
struct WriterLock {
    _file: File,
}

impl WriterLock {
    fn acquire(store_path: &Path) -> CalcResult<Self> {
        let lock_path = sidecar_path(store_path, "lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        file.lock_exclusive()
            .map_err(|e| CalcError::file_error("lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %lock_path.display(), "acquired store lock");
        Ok(WriterLock { _file: file })
    }
}

/// `<path>.<suffix>`, keeping any existing extension
fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut sidecar = path.to_path_buf();
    let extension = sidecar
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    sidecar.set_extension(extension);
    sidecar
}

/// Save the complete configuration list, replacing whatever was stored.
///
/// Creates the parent directory if needed.
pub fn save_configurations(path: &Path, configurations: &[ArrowConfiguration]) -> CalcResult<()> {
    ensure_parent_dir(path)?;
    let _lock = WriterLock::acquire(path)?;
    write_store(path, configurations)
}

fn ensure_parent_dir(path: &Path) -> CalcResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| CalcError::file_error("create directory", parent.display().to_string(), e.to_string())),
        _ => Ok(()),
    }
}

/// Atomic write. The caller holds the writer lock.
fn write_store(path: &Path, configurations: &[ArrowConfiguration]) -> CalcResult<()> {
    let store = StoreFile::new(configurations.to_vec());
    let json = serde_json::to_string_pretty(&store).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = sidecar_path(path, "tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), count = configurations.len(), "saved configurations");
    Ok(())
}

/// Load the configuration list.
///
/// # Returns
///
/// * `Err(CalcError::FileError)` - the file is missing or unreadable
/// * `Err(CalcError::SerializationError)` - the file is not a valid store
/// * `Err(CalcError::VersionMismatch)` - the file was written by an incompatible version
pub fn load_configurations(path: &Path) -> CalcResult<Vec<ArrowConfiguration>> {
    let mut file =
        File::open(path).map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let store: StoreFile = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&store.version)?;

    Ok(store.configurations)
}

/// Check a store file version against [`STORE_SCHEMA_VERSION`].
///
/// Major versions must match. While the major version is 0, a file with a
/// newer minor version is rejected too.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: STORE_SCHEMA_VERSION.to_string(),
    };

    let parse = |version: &str| -> Option<Vec<u32>> { version.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).filter(|p| !p.is_empty()).ok_or_else(mismatch)?;
    let current_parts = parse(STORE_SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 {
        let file_minor = file_parts.get(1).copied().unwrap_or(0);
        let current_minor = current_parts.get(1).copied().unwrap_or(0);
        if file_minor > current_minor {
            return Err(mismatch());
        }
    }

    Ok(())
}

/// Forgiving configuration store at a fixed path.
///
/// No method returns an error. Failures are logged with `tracing` and
/// degrade to an empty list or an unsaved change.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored configurations; empty when the file is absent or unusable.
    pub fn load(&self) -> Vec<ArrowConfiguration> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no configuration store yet");
            return Vec::new();
        }

        match load_configurations(&self.path) {
            Ok(configurations) => {
                info!(path = %self.path.display(), count = configurations.len(), "configurations loaded");
                configurations
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not load configurations, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored list.
    pub fn save(&self, configurations: &[ArrowConfiguration]) {
        match save_configurations(&self.path, configurations) {
            Ok(()) => info!(path = %self.path.display(), count = configurations.len(), "configurations saved"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not save configurations"),
        }
    }

    /// Find a configuration by id
    pub fn get(&self, id: &str) -> Option<ArrowConfiguration> {
        self.load().into_iter().find(|c| c.id == id)
    }

    /// Replace the configuration with the same id, or append it. Returns
    /// whether the store was written.
    pub fn upsert(&self, config: ArrowConfiguration) -> bool {
        self.modify(|configurations| {
            match configurations.iter_mut().find(|c| c.id == config.id) {
                Some(existing) => *existing = config,
                None => configurations.push(config),
            }
            true
        })
    }

    /// Remove a configuration by id. Returns whether it was present.
    pub fn remove(&self, id: &str) -> bool {
        self.modify(|configurations| {
            let before = configurations.len();
            configurations.retain(|c| c.id != id);
            configurations.len() != before
        })
    }

    /// Load, edit and save under one writer lock so concurrent edits are
    /// not lost. `edit` returns whether anything changed.
    ///
    /// A store file that exists but cannot be loaded is left untouched and
    /// the edit is dropped.
    fn modify(&self, edit: impl FnOnce(&mut Vec<ArrowConfiguration>) -> bool) -> bool {
        let result = ensure_parent_dir(&self.path).and_then(|()| {
            let _lock = WriterLock::acquire(&self.path)?;
            let mut configurations = if self.path.exists() {
                load_configurations(&self.path)?
            } else {
                Vec::new()
            };
            if edit(&mut configurations) {
                write_store(&self.path, &configurations)?;
                Ok(true)
            } else {
                Ok(false)
            }
        });

        match result {
            Ok(changed) => {
                if changed {
                    info!(path = %self.path.display(), "configuration store updated");
                }
                changed
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not update configurations");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{create_default_configuration, generate_id};
    use tempfile::tempdir;

    fn sample(name: &str) -> ArrowConfiguration {
        let mut draft = create_default_configuration();
        draft.name = Some(name.to_string());
        draft.build(generate_id()).unwrap()
    }

    #[test]
    fn test_sidecar_paths() {
        assert_eq!(
            sidecar_path(Path::new("/data/configurations.json"), "lock"),
            Path::new("/data/configurations.json.lock")
        );
        assert_eq!(sidecar_path(Path::new("/data/store"), "tmp"), Path::new("/data/store.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configurations.json");

        let configs = vec![sample("Hunting"), sample("Target")];
        save_configurations(&path, &configs).unwrap();

        let loaded = load_configurations(&path).unwrap();
        assert_eq!(loaded, configs);
    }

    #[test]
    fn test_save_overwrites_whole_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configurations.json");

        save_configurations(&path, &[sample("A"), sample("B")]).unwrap();
        save_configurations(&path, &[sample("C")]).unwrap();

        let loaded = load_configurations(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "C");
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configurations.json");

        save_configurations(&path, &[sample("A")]).unwrap();
        assert!(path.exists());
        assert!(!sidecar_path(&path, "tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("configurations.json");

        save_configurations(&path, &[]).unwrap();
        assert!(load_configurations(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(load_configurations(&missing).unwrap_err().error_code(), "FILE_ERROR");

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert_eq!(load_configurations(&corrupt).unwrap_err().error_code(), "SERIALIZATION_ERROR");

        let future = dir.path().join("future.json");
        fs::write(
            &future,
            r#"{ "version": "0.9.0", "saved_at": "2026-01-01T00:00:00Z", "configurations": [] }"#,
        )
        .unwrap();
        assert_eq!(load_configurations(&future).unwrap_err().error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(STORE_SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("").is_err());
        assert!(validate_version("latest").is_err());
    }

    #[test]
    fn test_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("configurations.json"));
        assert!(store.load().is_empty());
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_store_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configurations.json");
        fs::write(&path, "garbage").unwrap();

        let store = ConfigStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_store_save_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("configurations.json");
        fs::create_dir(&path).unwrap();

        let store = ConfigStore::new(&path);
        store.save(&[sample("A")]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_store_upsert_and_remove() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("configurations.json"));

        let first = sample("First");
        let second = sample("Second");
        assert!(store.upsert(first.clone()));
        store.upsert(second.clone());
        assert_eq!(store.load().len(), 2);

        let renamed = ArrowConfiguration {
            name: "First (renamed)".to_string(),
            ..first.clone()
        };
        store.upsert(renamed);
        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "First (renamed)");
        assert_eq!(store.get(&second.id), Some(second.clone()));

        assert!(store.remove(&first.id));
        assert!(!store.remove(&first.id));
        assert_eq!(store.load(), vec![second]);
    }

    #[test]
    fn test_store_edits_leave_unreadable_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configurations.json");
        let newer = r#"{ "version": "0.2.0", "saved_at": "2026-01-01T00:00:00Z", "configurations": [] }"#;
        fs::write(&path, newer).unwrap();

        let store = ConfigStore::new(&path);
        let config = sample("A");
        assert!(!store.upsert(config.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), newer);
        assert!(!store.remove(&config.id));
        assert_eq!(fs::read_to_string(&path).unwrap(), newer);

        fs::write(&path, "garbage").unwrap();
        assert!(!store.upsert(config));
        assert_eq!(fs::read_to_string(&path).unwrap(), "garbage");
    }

    #[test]
    fn test_store_file_envelope() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configurations.json");
        ConfigStore::new(&path).save(&[sample("A")]);

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], STORE_SCHEMA_VERSION);
        assert!(raw["saved_at"].is_string());
        assert_eq!(raw["configurations"].as_array().unwrap().len(), 1);
    }
}
