use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

pub const ACCESS_TOKEN_KEY: &str = "freela.access_token";
pub const USER_ID_KEY: &str = "freela.user_id";

/// Persistent string storage (browser `localStorage` on the web).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store, used natively and in tests.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.lock() {
            Ok(map) => map.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.values.lock() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.values.lock() {
            map.remove(key);
        }
    }
}

/// The persisted bearer credential and the identifier of the user it belongs to.
#[derive(Clone)]
pub struct Credentials {
    store: Arc<dyn KeyValueStore>,
}

impl Credentials {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn access_token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn set_access_token(&self, token: &str) {
        debug!("Persisting access token");
        self.store.set(ACCESS_TOKEN_KEY, token);
    }

    pub fn user_id(&self) -> Option<i64> {
        let raw = self.store.get(USER_ID_KEY)?;
        match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring malformed persisted user id: {}", raw);
                None
            }
        }
    }

    pub fn set_user_id(&self, id: i64) {
        self.store.set(USER_ID_KEY, &id.to_string());
    }

    pub fn clear(&self) {
        debug!("Clearing persisted credentials");
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(USER_ID_KEY);
    }
}
