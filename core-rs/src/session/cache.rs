//! Per-session identity cache - one live entity per URI

use std::collections::HashMap;
use std::sync::Arc;

use crate::session::resource::Resource;

#[derive(Debug, Default)]
pub struct IdentityCache {
    entries: HashMap<String, Arc<Resource>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uri: &str) -> Option<Arc<Resource>> {
        self.entries.get(uri).map(Arc::clone)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.entries.contains_key(uri)
    }

    /// Register `resource` under its URI unless that URI is taken
    ///
    /// Returns the entity that ends up cached, so a lost race hands back
    /// the first registration.
    pub fn register(&mut self, resource: Arc<Resource>) -> Arc<Resource> {
        Arc::clone(
            self.entries
                .entry(resource.uri().to_string())
                .or_insert(resource),
        )
    }

    pub fn remove(&mut self, uri: &str) -> Option<Arc<Resource>> {
        self.entries.remove(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
