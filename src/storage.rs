use freela_api::KeyValueStore;
use tracing::warn;

/// `window.localStorage`. Looked up on every call so the store holds no JS
/// handles and stays `Send + Sync`.
pub struct LocalStorage;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        match storage() {
            Some(s) => {
                if s.set_item(key, value).is_err() {
                    warn!("localStorage rejected write of {}", key);
                }
            }
            None => warn!("localStorage unavailable, {} not persisted", key),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(s) = storage() {
            let _ = s.remove_item(key);
        }
    }
}
