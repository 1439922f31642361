use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt,
    rc::Rc,
};

use thiserror::Error;

use crate::{stash::StashError, Value};

pub type Result<T, E = HostError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum HostError {
    #[error("Operation `{0}` is not defined")]
    UnknownOperation(String),
    #[error("Operation `{operation}` expects an argument at position {index}")]
    MissingArgument { operation: String, index: usize },
    #[error("expected `app.{property}` to be an object, got {got}")]
    NotAnObject { property: String, got: &'static str },
    #[error(transparent)]
    Stash(#[from] StashError),
}

/// Property storage and plugin bookkeeping the stash needs from its host.
pub trait Host {
    fn property(&self, name: &str) -> Option<&Value>;
    fn set_property(&mut self, name: &str, value: Value);
    fn has_capability(&self, capability: &str) -> bool;
    fn is_registered(&self, plugin: &str) -> bool;
}

/// A named operation installed on an [`App`] by a plugin.
pub type Operation = Rc<dyn Fn(&mut App, &[&str]) -> Result<()>>;

/// Extensible application object: named properties, capabilities, and
/// operations defined by plugins.
///
/// Not `Clone`: operations may own plugin state, such as the stash manager,
/// which a copy would share with the original.
///
/// ```compile_fail
/// let app = xstash::App::new();
/// let copy = app.clone();
/// ```
pub struct App {
    properties: BTreeMap<String, Value>,
    capabilities: BTreeSet<String>,
    registered: BTreeSet<String>,
    operations: HashMap<String, Operation>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// An app with the `base` capability, ready for plugins.
    pub fn new() -> Self {
        Self::bare().with_capability(crate::plugin::BASE_CAPABILITY)
    }

    /// An app without any capability.
    pub fn bare() -> Self {
        Self {
            properties: BTreeMap::new(),
            capabilities: BTreeSet::new(),
            registered: BTreeSet::new(),
            operations: HashMap::new(),
        }
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    /// Builds properties from the keys of `document`.
    pub fn from_document(document: Value) -> Result<Self> {
        let mut app = Self::new();
        app.load(document)?;
        Ok(app)
    }

    /// Sets one property per key of the `document` object.
    pub fn load(&mut self, document: Value) -> Result<()> {
        match document {
            Value::Object(map) => {
                for (k, v) in map {
                    self.properties.insert(k.to_string(), v);
                }
                Ok(())
            }
            other => Err(HostError::NotAnObject {
                property: "<document>".to_string(),
                got: other.type_name(),
            }),
        }
    }

    /// All properties as one object.
    pub fn to_document(&self) -> Value {
        self.properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Set `key` on the object held by `property`.
    pub fn set_key(&mut self, property: &str, key: &str, value: Value) -> Result<()> {
        match self.properties.get_mut(property) {
            Some(target) if target.is_object() => {
                target.insert(key, value);
                Ok(())
            }
            other => Err(HostError::NotAnObject {
                property: property.to_string(),
                got: other.map_or("nothing", |v| v.type_name()),
            }),
        }
    }

    pub fn register(&mut self, plugin: impl Into<String>) {
        self.registered.insert(plugin.into());
    }

    /// Install `operation` under `name`, replacing any previous definition.
    pub fn define(&mut self, name: impl Into<String>, operation: Operation) {
        let name = name.into();
        log::trace!("Define operation `{}`", name);
        self.operations.insert(name, operation);
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn invoke(&mut self, name: &str, args: &[&str]) -> Result<&mut Self> {
        let operation = self
            .operations
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::UnknownOperation(name.to_string()))?;
        log::trace!("Invoke `{}` with {:?}", name, args);
        operation(self, args)?;
        Ok(self)
    }
}

impl Host for App {
    fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    fn set_property(&mut self, name: &str, value: Value) {
        self.properties.insert(name.to_string(), value);
    }

    fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    fn is_registered(&self, plugin: &str) -> bool {
        self.registered.contains(plugin)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operations: Vec<_> = self.operations.keys().collect();
        operations.sort();
        f.debug_struct("App")
            .field("properties", &self.properties)
            .field("capabilities", &self.capabilities)
            .field("registered", &self.registered)
            .field("operations", &operations)
            .finish()
    }
}
