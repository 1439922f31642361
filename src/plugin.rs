use std::{cell::RefCell, rc::Rc};

use crate::{
    host::{App, Host, HostError, Result},
    stash::StashManager,
};

pub const PLUGIN_NAME: &str = "xstash";
pub const BASE_CAPABILITY: &str = "base";

/// Whether `plugin` may be installed on `host`: it must not be registered yet
/// and `host` must carry every capability in `required`.
pub fn is_valid<H: Host + ?Sized>(host: &H, plugin: &str, required: &[&str]) -> bool {
    if host.is_registered(plugin) {
        log::debug!("Plugin `{}` is already registered", plugin);
        return false;
    }
    match required.iter().find(|cap| !host.has_capability(cap)) {
        Some(missing) => {
            log::debug!("Plugin `{}` needs capability `{}`", plugin, missing);
            false
        }
        None => true,
    }
}

/// Defines the `stash` and `restore` operations on `app`.
///
/// Both take the property name and an optional snapshot name, and share one
/// [`StashManager`] owned by this installation. Does nothing and returns
/// `false` when `app` is not a valid host for the plugin.
pub fn install(app: &mut App) -> bool {
    if !is_valid(&*app, PLUGIN_NAME, &[BASE_CAPABILITY]) {
        log::info!("Skip installing `{}`", PLUGIN_NAME);
        return false;
    }
    app.register(PLUGIN_NAME);

    let manager: Rc<RefCell<StashManager>> = Rc::new(RefCell::new(StashManager::new()));
    {
        let manager = Rc::clone(&manager);
        app.define(
            "stash",
            Rc::new(move |app: &mut App, args: &[&str]| -> Result<()> {
                let property = argument("stash", args, 0)?;
                manager
                    .borrow_mut()
                    .stash(&*app, property, args.get(1).copied())?;
                Ok(())
            }),
        );
    }
    app.define(
        "restore",
        Rc::new(move |app: &mut App, args: &[&str]| -> Result<()> {
            let property = argument("restore", args, 0)?;
            manager
                .borrow_mut()
                .restore(app, property, args.get(1).copied())?;
            Ok(())
        }),
    );
    log::info!("Installed `{}`", PLUGIN_NAME);
    true
}

fn argument<'a>(operation: &str, args: &[&'a str], index: usize) -> Result<&'a str> {
    args.get(index).copied().ok_or_else(|| HostError::MissingArgument {
        operation: operation.to_string(),
        index,
    })
}
