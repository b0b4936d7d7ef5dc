use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::theme::domain::render_target::RenderTarget;

#[derive(Debug, Default)]
struct NodeState {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    mutations: u64,
}

/// In-memory stand-in for a document root element.
///
/// Clones share the same node, so a UI can keep a read handle while the
/// presenter owns the write side. Only real changes bump the mutation count.
#[derive(Debug, Clone, Default)]
pub struct RootNode {
    state: Arc<Mutex<NodeState>>,
}

impl RootNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.contains(class)
    }

    /// Sorted class list.
    pub fn classes(&self) -> Vec<String> {
        self.lock().classes.iter().cloned().collect()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.lock().attributes.get(name).cloned()
    }

    /// Number of writes that actually changed the node.
    pub fn mutations(&self) -> u64 {
        self.lock().mutations
    }

    fn lock(&self) -> MutexGuard<'_, NodeState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderTarget for RootNode {
    fn add_class(&mut self, class: &str) {
        let mut state = self.lock();
        if state.classes.insert(class.to_string()) {
            state.mutations += 1;
        }
    }

    fn remove_class(&mut self, class: &str) {
        let mut state = self.lock();
        if state.classes.remove(class) {
            state.mutations += 1;
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let mut state = self.lock();
        if state.attributes.get(name).map(String::as_str) == Some(value) {
            return;
        }
        state.attributes.insert(name.to_string(), value.to_string());
        state.mutations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redundant_writes_do_not_mutate() {
        let mut node = RootNode::new();
        node.add_class("dark");
        node.set_attribute("data-theme", "dark");
        assert_eq!(node.mutations(), 2);

        node.add_class("dark");
        node.remove_class("light");
        node.set_attribute("data-theme", "dark");
        assert_eq!(node.mutations(), 2);
    }

    #[test]
    fn test_clones_observe_writes() {
        let reader = RootNode::new();
        let mut writer = reader.clone();
        writer.add_class("light");
        writer.set_attribute("data-theme", "light");

        assert!(reader.has_class("light"));
        assert_eq!(reader.classes(), vec!["light".to_string()]);
        assert_eq!(reader.attribute("data-theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_remove_class() {
        let mut node = RootNode::new();
        node.add_class("light");
        node.remove_class("light");
        assert!(node.classes().is_empty());
        assert_eq!(node.mutations(), 2);
    }
}
