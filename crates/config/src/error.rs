use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SettingsError {
    /// Key is not of the form `group/name`.
    InvalidKey(String),
    /// Backing document could not be read or written.
    Io { path: PathBuf, message: String },
    /// Backing document exists but is not a valid settings document.
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid settings key '{key}' (expected group/name)"),
            Self::Io { path, message } => write!(f, "{}: IO error: {message}", path.display()),
            Self::Parse { path, message } => write!(f, "{}: parse error: {message}", path.display()),
        }
    }
}

impl std::error::Error for SettingsError {}

pub type Result<T> = std::result::Result<T, SettingsError>;
