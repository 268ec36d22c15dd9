//! Where raw values come from

use std::collections::{BTreeMap, HashMap};
use std::env;

/// A key/value namespace values are resolved from.
///
/// An empty value is treated as absent by every caller, so implementations
/// may return `Some("")` freely.
pub trait Source {
    fn get(&self, key: &str) -> Option<String>;

    /// Resolve `key`, returning an empty string when it is absent.
    fn resolve(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl Source for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
