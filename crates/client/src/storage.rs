use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::error::ClientError;

/// String key/value storage that outlives the page, the browser's local
/// storage in production
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// Keys of the values the client keeps between page loads
pub mod keys {
    pub const USER_ID: &str = "userId";
    pub const CATEGORY_ID: &str = "categoryId";
    pub const CATEGORY_NAME: &str = "categoryName";
    pub const WORKOUT_ID: &str = "workoutId";
    pub const COPIED_WORKOUT: &str = "copiedWorkout";
}

/// In memory storage, clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage(Rc<RefCell<HashMap<String, String>>>);

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo::storage::{LocalStorage, Storage as _};

    use super::Storage;
    use crate::error::{ClientError, ResultContext};

    /// The browser's `localStorage`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserStorage;

    impl Storage for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            // Values are plain strings rather than json so read them raw
            LocalStorage::raw().get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
            LocalStorage::raw()
                .set_item(key, value)
                .map_err(|e| ClientError::Storage {
                    message: format!("{e:?}"),
                })
                .with_context(|| format!("Setting {key}"))
        }

        fn remove(&self, key: &str) {
            LocalStorage::delete(key);
        }

        fn clear(&self) {
            LocalStorage::clear();
        }
    }
}
