use std::collections::HashMap;

/// Something that can hold named captures of a value and hand them back.
///
/// Several captures may share a name; they are kept in capture order and the
/// latest one is the one restored.
pub trait Snapshot {
    type Value;

    /// Record `value` under `name`.
    fn capture_named(&mut self, name: &str, value: Self::Value);

    /// Produce the latest capture under `name`, removing it when `consume` is set.
    /// `None` if nothing is held under `name`.
    fn restore_named(&mut self, name: &str, consume: bool) -> Option<Self::Value>;
}

/// Name to captured copies, the default [`Snapshot`] store.
#[derive(Debug, Clone)]
pub struct Snapshots<T> {
    captures: HashMap<String, Vec<T>>,
}

impl<T> Default for Snapshots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Snapshots<T> {
    pub fn new() -> Self {
        Self {
            captures: HashMap::new(),
        }
    }

    /// Number of captures held under `name`.
    pub fn count(&self, name: &str) -> usize {
        self.captures.get(name).map_or(0, Vec::len)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.captures.keys().map(String::as_str)
    }

    /// Total number of captures over all names.
    pub fn len(&self) -> usize {
        self.captures.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}

impl<T: Clone> Snapshot for Snapshots<T> {
    type Value = T;

    fn capture_named(&mut self, name: &str, value: T) {
        self.captures
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn restore_named(&mut self, name: &str, consume: bool) -> Option<T> {
        if !consume {
            return self.captures.get(name)?.last().cloned();
        }
        let versions = self.captures.get_mut(name)?;
        let value = versions.pop();
        if versions.is_empty() {
            self.captures.remove(name);
        }
        value
    }
}
