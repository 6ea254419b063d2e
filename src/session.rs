use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::Mutex;

/// Trait for session-scoped key-value storage, allowing for test doubles
/// without a real browser environment.
///
/// Absence of a key is a normal condition, not an error: `get` returns
/// `None` and callers take their no-op path.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-process session storage.
///
/// The stored values live exactly as long as this value does; dropping the
/// store is the equivalent of the browser session ending. Values are held
/// as `SecretString` so a `Debug` dump of the store never prints a token.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, SecretString>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("session store mutex poisoned")
            .get(key)
            .map(|value| value.expose_secret().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("session store mutex poisoned")
            .insert(key.to_string(), SecretString::new(value.to_string()));
    }
}
