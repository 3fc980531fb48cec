use folio_core::theme::{MemoryStore, PreferenceStore};

/// [`PreferenceStore`] over `localStorage`.
///
/// Private browsing modes can deny storage access; writes then land in
/// memory for the rest of the session.
pub enum LocalStore {
    Browser(web_sys::Storage),
    Memory(MemoryStore),
}

impl LocalStore {
    pub fn open() -> Self {
        match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => Self::Browser(storage),
            None => {
                tracing::warn!("localStorage unavailable, theme preference will not persist");
                Self::Memory(MemoryStore::default())
            }
        }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Browser(storage) => storage.get_item(key).ok().flatten(),
            Self::Memory(memory) => memory.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match self {
            Self::Browser(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    tracing::warn!(error = ?e, key, "Failed to persist preference");
                }
            }
            Self::Memory(memory) => memory.set(key, value),
        }
    }
}
