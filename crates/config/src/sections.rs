//! Typed views over the two settings groups
//!
//! Panels read these instead of raw values. Missing or malformed values
//! fall back to the defaults.

use std::path::PathBuf;

use crate::settings::Settings;
use crate::store::ConfigStore;
use crate::value::CheckState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebuggerSettings {
    pub host: String,
    pub port_number: u16,
    pub idekey: String,
    pub break_at_first_line: CheckState,
    pub max_depth: u32,
    pub max_children: u32,
    pub max_data: u32,
}

impl Default for DebuggerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port_number: 9000,
            idekey: "pugdebug".to_string(),
            break_at_first_line: CheckState::Checked,
            max_depth: 3,
            max_children: 128,
            max_data: 512,
        }
    }
}

impl DebuggerSettings {
    pub fn load<S: ConfigStore>(settings: &Settings<S>) -> Self {
        let fallback = Self::default();
        let text = |key: &str, default: String| {
            settings
                .get(key)
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or(default)
        };
        let number = |key: &str| settings.get(key).and_then(|v| v.as_i64());

        Self {
            host: text("debugger/host", fallback.host),
            port_number: number("debugger/port_number")
                .and_then(|n| u16::try_from(n).ok())
                .unwrap_or(fallback.port_number),
            idekey: text("debugger/idekey", fallback.idekey),
            break_at_first_line: number("debugger/break_at_first_line")
                .and_then(CheckState::from_i64)
                .unwrap_or(fallback.break_at_first_line),
            max_depth: number("debugger/max_depth")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(fallback.max_depth),
            max_children: number("debugger/max_children")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(fallback.max_children),
            max_data: number("debugger/max_data")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(fallback.max_data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSettings {
    pub project_root: PathBuf,
    pub path_mapping: String,
}

impl PathSettings {
    pub fn load<S: ConfigStore>(settings: &Settings<S>) -> Self {
        let project_root = settings
            .get("path/project_root")
            .and_then(|v| v.as_str().map(PathBuf::from))
            .unwrap_or_else(|| settings.defaults().home().to_path_buf());
        let path_mapping = settings
            .get("path/path_mapping")
            .map(|v| v.to_string())
            .unwrap_or_default();
        Self { project_root, path_mapping }
    }
}
