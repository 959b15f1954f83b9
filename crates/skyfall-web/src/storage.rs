use skyfall::SessionFlags;
use web_sys::{Storage, Window};

/// Flags kept in the tab's `sessionStorage`.
pub struct SessionStorageFlags {
    storage: Storage,
}

impl SessionStorageFlags {
    /// `None` if storage is disabled (private mode, sandboxed frames).
    pub fn from_window(window: &Window) -> Option<Self> {
        let storage = window.session_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl SessionFlags for SessionStorageFlags {
    fn get(&self, key: &str) -> bool {
        matches!(self.storage.get_item(key), Ok(Some(v)) if v == "1")
    }

    fn set(&mut self, key: &str, value: bool) {
        let result = if value {
            self.storage.set_item(key, "1")
        } else {
            self.storage.remove_item(key)
        };
        if let Err(e) = result {
            log::warn!("sessionStorage write for {} failed: {:?}", key, e);
        }
    }
}
