// pugdebug settings CLI - inspect and edit the persisted settings
//
// Opens the same document the desktop front-end uses, applies missing
// defaults exactly as the front-end does on startup, then runs one command.

mod exit_codes;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pugdebug_config::{AppIdentity, FileStore, SettingKey, SettingValue, Settings, SettingsError};

use exit_codes::{EXIT_ABSENT, EXIT_STORE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "pugdebug-settings")]
#[command(about = "Inspect and edit pugdebug settings")]
#[command(version)]
struct Cli {
    /// Settings document to use instead of the per-user one
    #[arg(long, global = true, env = "PUGDEBUG_SETTINGS")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of a key
    #[command(after_help = "\
Examples:
  pugdebug-settings get debugger/host
  pugdebug-settings get path/project_root")]
    Get {
        /// Key as group/name
        key: String,
    },

    /// Exit 0 if the key has a value (even an empty one), 1 otherwise
    Has {
        /// Key as group/name
        key: String,
    },

    /// Write a value
    #[command(after_help = "\
Examples:
  pugdebug-settings set debugger/port_number 9001 --int
  pugdebug-settings set path/path_mapping '/var/www=>/srv'")]
    Set {
        /// Key as group/name
        key: String,

        /// Value to store
        value: String,

        /// Store as an integer instead of text
        #[arg(long)]
        int: bool,
    },

    /// Remove a key (defaults come back on next start)
    Unset {
        /// Key as group/name
        key: String,
    },

    /// Restore a key's default value
    Reset {
        /// Key as group/name
        key: String,
    },

    /// Print every stored setting
    List {
        /// Output as a JSON object keyed by group/name
        #[arg(long)]
        json: bool,
    },

    /// Print the location of the settings document
    Path,
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
}

impl CliError {
    /// Nothing to report beyond the exit code.
    fn absent() -> Self {
        Self { code: EXIT_ABSENT, message: String::new() }
    }

    fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into() }
    }

    fn store(msg: impl Into<String>) -> Self {
        Self { code: EXIT_STORE, message: msg.into() }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::InvalidKey(_) => Self::usage(err.to_string()),
            _ => Self::store(err.to_string()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let store = match cli.file {
        Some(path) => FileStore::at(path),
        None => FileStore::open(&AppIdentity::PUGDEBUG),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match run(store, cli.command, &mut handle) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            ExitCode::from(code)
        }
    }
}

fn run(store: FileStore, command: Commands, out: &mut impl Write) -> Result<(), CliError> {
    if let Commands::Path = command {
        return emit(out, store.path().display());
    }

    let settings = Settings::initialize(store)?;

    match command {
        Commands::Get { key } => cmd_get(&settings, &key, out),
        Commands::Has { key } => cmd_has(&settings, &key),
        Commands::Set { key, value, int } => cmd_set(&settings, &key, &value, int),
        Commands::Unset { key } => cmd_unset(&settings, &key),
        Commands::Reset { key } => cmd_reset(&settings, &key, out),
        Commands::List { json } => cmd_list(&settings, json, out),
        Commands::Path => unreachable!("handled before initialize"),
    }
}

fn emit(out: &mut impl Write, line: impl std::fmt::Display) -> Result<(), CliError> {
    writeln!(out, "{}", line).map_err(|e| CliError::store(e.to_string()))
}

/// Reject malformed keys up front; the facade would read them as absent.
fn check_key(key: &str) -> Result<(), CliError> {
    SettingKey::parse(key)?;
    Ok(())
}

fn cmd_get(settings: &Settings, key: &str, out: &mut impl Write) -> Result<(), CliError> {
    check_key(key)?;
    match settings.get(key) {
        Some(value) => emit(out, value),
        None => Err(CliError::absent()),
    }
}

fn cmd_has(settings: &Settings, key: &str) -> Result<(), CliError> {
    check_key(key)?;
    if settings.has(key) {
        Ok(())
    } else {
        Err(CliError::absent())
    }
}

fn parse_value(value: &str, int: bool) -> Result<SettingValue, CliError> {
    if !int {
        return Ok(SettingValue::from(value));
    }
    value
        .trim()
        .parse::<i64>()
        .map(SettingValue::Integer)
        .map_err(|_| CliError::usage(format!("'{}' is not an integer", value)))
}

fn cmd_set(settings: &Settings, key: &str, value: &str, int: bool) -> Result<(), CliError> {
    let value = parse_value(value, int)?;
    settings.try_set(key, value)?;
    Ok(())
}

fn cmd_unset(settings: &Settings, key: &str) -> Result<(), CliError> {
    if settings.remove(key)? {
        Ok(())
    } else {
        Err(CliError::absent())
    }
}

fn cmd_reset(settings: &Settings, key: &str, out: &mut impl Write) -> Result<(), CliError> {
    match settings.reset(key)? {
        Some(value) => emit(out, value),
        None => Err(CliError { code: EXIT_ABSENT, message: format!("{} has no default", key) }),
    }
}

fn cmd_list(settings: &Settings, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let entries = settings.entries()?;

    if json {
        let mut map = serde_json::Map::new();
        for (key, value) in entries {
            let value = serde_json::to_value(&value).map_err(|e| CliError::store(e.to_string()))?;
            map.insert(key.to_string(), value);
        }
        let text = serde_json::to_string_pretty(&serde_json::Value::Object(map))
            .map_err(|e| CliError::store(e.to_string()))?;
        return emit(out, text);
    }

    for (key, value) in entries {
        emit(out, format!("{} = {}", key, value))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_cmd(dir: &TempDir, command: Commands) -> (Result<(), CliError>, String) {
        let store = FileStore::at(dir.path().join("pugdebug.json"));
        let mut out = Vec::new();
        let result = run(store, command, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn code(result: &Result<(), CliError>) -> u8 {
        match result {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => e.code,
        }
    }

    #[test]
    fn test_get_default() {
        let dir = TempDir::new().unwrap();
        let (result, out) = run_cmd(&dir, Commands::Get { key: "debugger/host".into() });
        assert!(result.is_ok());
        assert_eq!(out, "127.0.0.1\n");
    }

    #[test]
    fn test_get_absent_and_malformed() {
        let dir = TempDir::new().unwrap();
        let (result, _) = run_cmd(&dir, Commands::Get { key: "debugger/nonexistent_key".into() });
        assert_eq!(code(&result), EXIT_ABSENT);

        let (result, _) = run_cmd(&dir, Commands::Get { key: "host".into() });
        assert_eq!(code(&result), EXIT_USAGE);
    }

    #[test]
    fn test_set_int_then_get() {
        let dir = TempDir::new().unwrap();
        let (result, _) = run_cmd(
            &dir,
            Commands::Set { key: "debugger/port_number".into(), value: "9001".into(), int: true },
        );
        assert!(result.is_ok());

        let (_, out) = run_cmd(&dir, Commands::Get { key: "debugger/port_number".into() });
        assert_eq!(out, "9001\n");

        let store = FileStore::at(dir.path().join("pugdebug.json"));
        let settings = Settings::initialize(store).unwrap();
        assert_eq!(settings.get("debugger/port_number"), Some(SettingValue::Integer(9001)));
    }

    #[test]
    fn test_set_int_rejects_text() {
        let dir = TempDir::new().unwrap();
        let (result, _) = run_cmd(
            &dir,
            Commands::Set { key: "debugger/port_number".into(), value: "nine".into(), int: true },
        );
        assert_eq!(code(&result), EXIT_USAGE);
    }

    #[test]
    fn test_has_empty_value() {
        let dir = TempDir::new().unwrap();
        let (result, _) = run_cmd(&dir, Commands::Has { key: "path/path_mapping".into() });
        assert!(result.is_ok());
        let (result, _) = run_cmd(&dir, Commands::Has { key: "path/nope".into() });
        assert_eq!(code(&result), EXIT_ABSENT);
    }

    #[test]
    fn test_reset_and_unset() {
        let dir = TempDir::new().unwrap();
        run_cmd(&dir, Commands::Set { key: "debugger/idekey".into(), value: "phpstorm".into(), int: false })
            .0
            .unwrap();
        let (result, out) = run_cmd(&dir, Commands::Reset { key: "debugger/idekey".into() });
        assert!(result.is_ok());
        assert_eq!(out, "pugdebug\n");

        let (result, _) = run_cmd(&dir, Commands::Reset { key: "custom/key".into() });
        assert_eq!(code(&result), EXIT_ABSENT);

        let (result, _) = run_cmd(&dir, Commands::Unset { key: "custom/key".into() });
        assert_eq!(code(&result), EXIT_ABSENT);
    }

    #[test]
    fn test_list_json() {
        let dir = TempDir::new().unwrap();
        let (result, out) = run_cmd(&dir, Commands::List { json: true });
        assert!(result.is_ok());

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["debugger/port_number"], 9000);
        assert_eq!(parsed["debugger/max_depth"], "3");
        assert_eq!(parsed.as_object().unwrap().len(), 9);
    }

    #[test]
    fn test_list_plain() {
        let dir = TempDir::new().unwrap();
        let (_, out) = run_cmd(&dir, Commands::List { json: false });
        assert!(out.lines().any(|l| l == "debugger/break_at_first_line = 2"));
        assert!(out.lines().any(|l| l == "path/path_mapping = "));
    }

    #[test]
    fn test_path_does_not_create_document() {
        let dir = TempDir::new().unwrap();
        let (result, out) = run_cmd(&dir, Commands::Path);
        assert!(result.is_ok());
        assert!(out.trim_end().ends_with("pugdebug.json"));
        assert!(!dir.path().join("pugdebug.json").exists());
    }

    #[test]
    fn test_corrupt_document_is_store_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pugdebug.json"), "nope").unwrap();
        let (result, _) = run_cmd(&dir, Commands::List { json: false });
        assert_eq!(code(&result), EXIT_STORE);
    }
}
