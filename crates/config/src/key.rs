//! Setting keys
//!
//! A key is a `(group, name)` pair. The fully-qualified form joins them
//! with `/`, e.g. `debugger/host`.

use std::fmt;

use crate::error::{Result, SettingsError};

pub const SEPARATOR: char = '/';

/// The groups populated by the defaults table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Debugger,
    Path,
}

impl Group {
    pub fn as_str(self) -> &'static str {
        match self {
            Group::Debugger => "debugger",
            Group::Path => "path",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SettingKey {
    pub group: String,
    pub name: String,
}

impl SettingKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self { group: group.into(), name: name.into() }
    }

    /// Split `group/name` on the first separator.
    pub fn parse(key: &str) -> Result<Self> {
        match key.split_once(SEPARATOR) {
            Some((group, name)) if !group.is_empty() && !name.is_empty() => {
                Ok(Self::new(group, name))
            }
            _ => Err(SettingsError::InvalidKey(key.to_string())),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.group, SEPARATOR, self.name)
    }
}
