use std::{
    collections::HashSet,
    sync::Arc,
};

use tracing::{
    debug,
    warn,
};

use super::WordCloudError;
use crate::persistence::{
    KeyValueStore,
    MemoryStore,
    STOPWORDS_KEY,
};

pub const BUILTIN_STOPWORDS: &[&str] = &[
    "的", "了", "和", "是", "就", "都", "而", "及", "与", "着", "之", "用", "于", "把", "被", "让",
    "给", "但", "却", "地", "得", "等", "去", "说", "对", "也", "这", "那", "你", "我", "他", "她",
    "它", "们", "么", "什么", "这个", "那个", "哪个", "谁", "啊", "呢", "吧", "啦", "吗", "嗯",
    "哦", "哎", "唉",
];

/// Built-in words can never be removed; custom words are persisted on every change.
pub struct StopwordStore {
    builtin: HashSet<&'static str>,
    custom: Vec<String>,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for StopwordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordStore")
            .field("builtin", &self.builtin.len())
            .field("custom", &self.custom)
            .field("store", &"Arc<dyn KeyValueStore>")
            .finish()
    }
}

impl StopwordStore {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, WordCloudError> {
        let builtin: HashSet<&'static str> = BUILTIN_STOPWORDS.iter().copied().collect();

        let saved = match store.get(STOPWORDS_KEY)? {
            Some(json) => serde_json::from_str::<Vec<String>>(&json).unwrap_or_else(|e| {
                warn!("Failed to parse saved stopwords: {}. Starting empty.", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        let mut custom: Vec<String> = Vec::with_capacity(saved.len());
        for word in saved {
            if word.is_empty() || builtin.contains(word.as_str()) || custom.contains(&word) {
                continue;
            }
            custom.push(word);
        }

        debug!("Loaded {} custom stopwords", custom.len());
        Ok(Self { builtin, custom, store })
    }

    /// A store with no saved custom words, backed by memory.
    pub fn in_memory() -> Self {
        Self {
            builtin: BUILTIN_STOPWORDS.iter().copied().collect(),
            custom: Vec::new(),
            store: Arc::new(MemoryStore::new()),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.builtin.contains(word) || self.custom.iter().any(|w| w == word)
    }

    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtin.contains(word)
    }

    pub fn add(&mut self, word: &str) -> Result<(), WordCloudError> {
        if word.is_empty() {
            return Err(WordCloudError::InvalidStopword);
        }
        if self.contains(word) {
            return Err(WordCloudError::DuplicateStopword(word.to_string()));
        }

        self.custom.push(word.to_string());
        if let Err(e) = self.save() {
            self.custom.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Returns whether the word was present. Absent words are not an error,
    /// and the custom list is written back either way.
    pub fn remove(&mut self, word: &str) -> Result<bool, WordCloudError> {
        if self.is_builtin(word) {
            return Err(WordCloudError::ProtectedStopword(word.to_string()));
        }

        let Some(pos) = self.custom.iter().position(|w| w == word) else {
            self.save()?;
            return Ok(false);
        };

        let removed = self.custom.remove(pos);
        if let Err(e) = self.save() {
            self.custom.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }

    pub fn custom_words(&self) -> &[String] {
        &self.custom
    }

    pub fn builtin_words(&self) -> &'static [&'static str] {
        BUILTIN_STOPWORDS
    }

    fn save(&self) -> Result<(), WordCloudError> {
        let json = serde_json::to_string(&self.custom)?;
        self.store.set(STOPWORDS_KEY, &json)
    }
}
