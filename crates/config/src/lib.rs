// Settings for the pugdebug front-end
//
// A grouped key/value store persisted per application identity, populated
// with defaults on first run and read by the panels through `Settings`.

pub mod defaults;
pub mod error;
pub mod identity;
pub mod key;
pub mod sections;
pub mod settings;
pub mod store;
pub mod value;

pub use defaults::{DefaultsInitializer, DEFAULTS};
pub use error::{Result, SettingsError};
pub use identity::AppIdentity;
pub use key::{Group, SettingKey};
pub use sections::{DebuggerSettings, PathSettings};
pub use settings::Settings;
pub use store::{ConfigStore, FileStore, MemoryStore};
pub use value::{CheckState, SettingValue};
