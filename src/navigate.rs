use std::sync::Mutex;

/// Trait for the full-page navigation side effect, allowing tests to
/// assert on the target location without performing a real navigation.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, location: &str);
}

/// Default implementation that records the most recent requested location.
///
/// A library cannot move the browser itself, so the redirect is deferred:
/// the lifecycle records where it wants to go and the host application
/// observes the slot and performs the actual navigation.
#[derive(Debug, Default)]
pub struct PendingNavigator {
    requested: Mutex<Option<String>>,
}

impl PendingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently requested location, if any.
    pub fn requested(&self) -> Option<String> {
        self.requested
            .lock()
            .expect("navigator mutex poisoned")
            .clone()
    }

    /// Returns the most recently requested location and clears the slot.
    pub fn take_requested(&self) -> Option<String> {
        self.requested
            .lock()
            .expect("navigator mutex poisoned")
            .take()
    }
}

impl Navigator for PendingNavigator {
    fn navigate_to(&self, location: &str) {
        tracing::debug!("Navigation requested: {}", location);
        *self.requested.lock().expect("navigator mutex poisoned") = Some(location.to_string());
    }
}
