use std::{
    collections::BTreeMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
    sync::Mutex,
};

use serde::Deserialize;
use tracing::{
    debug,
    warn,
};

use crate::core::WordCloudError;

const APP_NAME: &str = "wordcloud";
const STORE_FILE: &str = "storage.json";

pub const THEME_KEY: &str = "theme";
pub const STOPWORDS_KEY: &str = "stopwords";
pub const SAVED_TEXT_KEY: &str = "savedText";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, WordCloudError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> T {
    match load_json::<T>(file_path) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", file_path.display(), e);
            T::default()
        }
    }
}

/// String-valued key-value storage shared between the session and its
/// background writers.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, WordCloudError>;
    fn set(&self, key: &str, value: &str) -> Result<(), WordCloudError>;
    fn remove(&self, key: &str) -> Result<(), WordCloudError>;
}

fn lock_entries(
    entries: &Mutex<BTreeMap<String, String>>,
) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, WordCloudError> {
    entries.lock().map_err(|_| WordCloudError::Custom("Failed to lock storage".to_string()))
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, WordCloudError> {
        Ok(lock_entries(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WordCloudError> {
        lock_entries(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), WordCloudError> {
        lock_entries(&self.entries)?.remove(key);
        Ok(())
    }
}

/// All keys live in one JSON object on disk, rewritten in full on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn open_in(dir: &Path) -> Result<Self, WordCloudError> {
        Self::open(dir.join(STORE_FILE))
    }

    pub fn open(file_path: PathBuf) -> Result<Self, WordCloudError> {
        let entries = if file_path.exists() {
            let content = fs::read_to_string(&file_path)?;
            match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring corrupt storage file {}: {}", file_path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { file_path, entries: Mutex::new(entries) })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), WordCloudError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.file_path, content)?;
        debug!("Storage saved to: {}", self.file_path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, WordCloudError> {
        Ok(lock_entries(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WordCloudError> {
        let mut entries = lock_entries(&self.entries)?;
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save(&entries) {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), WordCloudError> {
        let mut entries = lock_entries(&self.entries)?;
        if let Some(old) = entries.remove(key) {
            if let Err(e) = self.save(&entries) {
                entries.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);

        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        store.remove(THEME_KEY).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = JsonFileStore::open_in(dir.path()).unwrap();
        store.set(SAVED_TEXT_KEY, "猫 狗").unwrap();
        store.set(STOPWORDS_KEY, r#"["测试"]"#).unwrap();
        drop(store);

        let reopened = JsonFileStore::open_in(dir.path()).unwrap();
        assert_eq!(reopened.get(SAVED_TEXT_KEY).unwrap().as_deref(), Some("猫 狗"));
        assert_eq!(reopened.get(STOPWORDS_KEY).unwrap().as_deref(), Some(r#"["测试"]"#));
    }

    #[test]
    fn test_json_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "{not json").unwrap();

        let store = JsonFileStore::open_in(dir.path()).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);

        store.set(THEME_KEY, "light").unwrap();
        let reopened = JsonFileStore::open_in(dir.path()).unwrap();
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_load_json_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let missing: Vec<String> = load_json_or_default(&path);
        assert!(missing.is_empty());

        fs::write(&path, "[1, 2").unwrap();
        let malformed: Vec<u32> = load_json_or_default(&path);
        assert!(malformed.is_empty());
    }
}
