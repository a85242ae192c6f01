use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::core::prefs::PreferenceStore;

/// In-memory preference store. Used as the fallback when the on-disk
/// store cannot be opened, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        let prefs = self.inner.lock().await;
        let value = prefs.get(key).cloned();
        debug!("Preference GET {}: {:?}", key, value);
        value
    }

    async fn set(&self, key: &str, value: &str) {
        let mut prefs = self.inner.lock().await;
        debug!("Preference SET {}: {}", key, value);
        prefs.insert(key.to_string(), value.to_string());
    }
}
