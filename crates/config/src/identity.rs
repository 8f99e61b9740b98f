//! Application identity
//!
//! The organization/domain/application triple that names the persisted
//! settings. Two processes with the same identity share one document.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppIdentity {
    pub organization: &'static str,
    pub domain: &'static str,
    pub application: &'static str,
}

impl AppIdentity {
    pub const PUGDEBUG: AppIdentity = AppIdentity {
        organization: "pugdebug",
        domain: "http://github.com/robertbasic/pugdebug",
        application: "pugdebug",
    };

    /// Location of the settings document for this identity.
    ///
    /// `~/.config/<organization>/<application>.json` on Linux, the platform
    /// equivalent elsewhere. Falls back to the current directory when the
    /// platform has no config directory.
    pub fn settings_path(&self) -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(self.organization)
            .join(format!("{}.json", self.application))
    }
}
