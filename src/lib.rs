pub use host::{App, Host, HostError, Operation};
pub use number::Number;
pub use plugin::{install, is_valid, BASE_CAPABILITY, PLUGIN_NAME};
pub use script::{parse_script, run_script, Command, ScriptError};
pub use snapshot::{Snapshot, Snapshots};
pub use stash::{Stash, StashError, StashManager, DEFAULT_NAME};
pub use value::{Array, Object, Value};

pub mod host;
mod number;
pub mod plugin;
pub mod script;
pub mod snapshot;
pub mod stash;
pub mod value;
