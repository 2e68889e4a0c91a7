//! Non-fatal warnings, each reported at most once per key

use std::collections::HashSet;
use std::sync::Mutex;

/// Sink for warnings that must not stop resolution.
///
/// A warning is logged through `tracing` the first time its key is seen;
/// later warnings with the same key are dropped.
#[derive(Debug, Default)]
pub struct Warnings {
    seen: Mutex<HashSet<String>>,
    emitted: Mutex<Vec<String>>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `message` unless a warning with `key` was already reported.
    ///
    /// Returns whether the warning was emitted.
    pub fn warn_once(&self, key: &str, message: impl Into<String>) -> bool {
        let first = match self.seen.lock() {
            Ok(mut seen) => seen.insert(key.to_string()),
            Err(poisoned) => poisoned.into_inner().insert(key.to_string()),
        };
        if !first {
            return false;
        }
        let message = message.into();
        tracing::warn!(key, "{}", message);
        match self.emitted.lock() {
            Ok(mut emitted) => emitted.push(message),
            Err(poisoned) => poisoned.into_inner().push(message),
        }
        true
    }

    /// Messages emitted so far, in order.
    pub fn emitted(&self) -> Vec<String> {
        match self.emitted.lock() {
            Ok(emitted) => emitted.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
