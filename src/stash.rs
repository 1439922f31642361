use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use thiserror::Error;

use crate::{
    host::Host,
    snapshot::{Snapshot, Snapshots},
    Value,
};

/// Snapshot name used when none is given.
pub const DEFAULT_NAME: &str = "default";

pub type Result<T, E = StashError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum StashError {
    #[error("expected `app.{property}` to be an object, got {got}")]
    NotAnObject { property: String, got: &'static str },
    #[error("Nothing is stashed for `app.{0}`")]
    NothingStashed(String),
    #[error("No snapshot named `{name}` is stashed for `app.{property}`")]
    SnapshotNotFound { property: String, name: String },
}

/// Per-property snapshot handles plus the stack of pending snapshot names.
///
/// For every property and name, the handle holds exactly as many captures as
/// the name occurs in that property's stack.
#[derive(Debug)]
pub struct StashManager<S = Snapshots<Value>> {
    cache: HashMap<String, S>,
    stack: HashMap<String, Vec<String>>,
}

impl<S> Default for StashManager<S> {
    fn default() -> Self {
        Self {
            cache: HashMap::new(),
            stack: HashMap::new(),
        }
    }
}

impl<S: Snapshot<Value = Value> + Default> StashManager<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current value of `host.property` under `name`
    /// (or [`DEFAULT_NAME`]) and push the name on the property's stack.
    pub fn stash<H: Host + ?Sized>(
        &mut self,
        host: &H,
        property: &str,
        name: Option<&str>,
    ) -> Result<()> {
        let value = expect_object(host, property)?.clone();
        let name = resolve_default(name);

        let handle = self.cache.entry(property.to_string()).or_insert_with(|| {
            log::debug!("Create snapshot handle for `{}`", property);
            S::default()
        });
        let stack = self.stack.entry(property.to_string()).or_default();
        stack.push(name.to_string());
        log::trace!("Stack of `{}` is now {:?}", property, stack);

        handle.capture_named(name, value);
        log::debug!("Stashed `{}` as `{}`", property, name);
        Ok(())
    }

    /// Overwrite `host.property` with a stashed value.
    ///
    /// Without a name, the most recently stashed name is popped. A name equal
    /// to the top of the stack is popped as well; any other name is only
    /// looked up and the stack is left alone.
    pub fn restore<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        property: &str,
        name: Option<&str>,
    ) -> Result<()> {
        expect_object(&*host, property)?;
        let handle = self
            .cache
            .get_mut(property)
            .ok_or_else(|| StashError::NothingStashed(property.to_string()))?;
        let stack = self.stack.entry(property.to_string()).or_default();

        let (name, pop) = match name.filter(|name| !name.is_empty()) {
            Some(name) => (name.to_string(), stack.last().map(String::as_str) == Some(name)),
            None => match stack.last() {
                Some(top) => (top.clone(), true),
                None => return Err(StashError::NothingStashed(property.to_string())),
            },
        };

        let value =
            handle
                .restore_named(&name, pop)
                .ok_or_else(|| StashError::SnapshotNotFound {
                    property: property.to_string(),
                    name: name.clone(),
                })?;
        if pop {
            stack.pop();
            log::trace!("Stack of `{}` is now {:?}", property, stack);
        }

        host.set_property(property, value);
        log::debug!("Restored `{}` from `{}`", property, name);
        Ok(())
    }
}

impl<S> StashManager<S> {
    /// Names stashed for `property` and not yet popped, oldest first.
    pub fn pending(&self, property: &str) -> &[String] {
        self.stack.get(property).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `property` has ever been stashed.
    pub fn is_stashed(&self, property: &str) -> bool {
        self.cache.contains_key(property)
    }

    pub fn handle(&self, property: &str) -> Option<&S> {
        self.cache.get(property)
    }
}

fn resolve_default(name: Option<&str>) -> &str {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_NAME,
    }
}

fn expect_object<'a, H: Host + ?Sized>(host: &'a H, property: &str) -> Result<&'a Value> {
    match host.property(property) {
        Some(value) if value.is_object() => Ok(value),
        other => Err(StashError::NotAnObject {
            property: property.to_string(),
            got: other.map_or("nothing", Value::type_name),
        }),
    }
}

/// A host bundled with its own [`StashManager`].
///
/// Both operations return `&mut Self`, and `Stash` derefs to the host, so
/// calls chain and the host stays reachable.
///
/// ```
/// use xstash::{App, Host, Stash, Value};
///
/// let mut app = Stash::new(App::new());
/// app.set_property("options", serde_json::from_str(r#"{"foo": "bar"}"#).unwrap());
/// app.stash("options", None).unwrap();
/// app.set_property("options", Value::object());
/// app.restore("options", None).unwrap();
/// assert_eq!(
///     app.property("options").and_then(|v| v.get("foo")),
///     Some(&Value::string("bar"))
/// );
/// ```
#[derive(Debug, Default)]
pub struct Stash<H> {
    host: H,
    manager: StashManager,
}

impl<H: Host> Stash<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            manager: StashManager::new(),
        }
    }

    pub fn stash(&mut self, property: &str, name: Option<&str>) -> Result<&mut Self> {
        self.manager.stash(&self.host, property, name)?;
        Ok(self)
    }

    pub fn restore(&mut self, property: &str, name: Option<&str>) -> Result<&mut Self> {
        self.manager.restore(&mut self.host, property, name)?;
        Ok(self)
    }

    pub fn manager(&self) -> &StashManager {
        &self.manager
    }

    pub fn into_inner(self) -> H {
        self.host
    }
}

impl<H> Deref for Stash<H> {
    type Target = H;

    fn deref(&self) -> &H {
        &self.host
    }
}

impl<H> DerefMut for Stash<H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
