//! Setting values
//!
//! Values are either integers or text, stored as JSON numbers or strings.
//! Several numeric settings (`max_depth` and friends) are historically
//! stored as text, so integer reads accept string-encoded integers.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Integer(i64),
    Text(String),
}

impl SettingValue {
    /// Returns the text if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            SettingValue::Integer(_) => None,
        }
    }

    /// Returns the integer, parsing string-encoded integers
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(n) => Some(*n),
            SettingValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Integer(n) => write!(f, "{n}"),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Integer(n)
    }
}

impl From<i32> for SettingValue {
    fn from(n: i32) -> Self {
        SettingValue::Integer(n.into())
    }
}

impl From<u16> for SettingValue {
    fn from(n: u16) -> Self {
        SettingValue::Integer(n.into())
    }
}

/// Three-valued checkbox state stored as a plain integer.
///
/// `Checked` (2) is the default for `break_at_first_line`; 1 is the
/// in-between state and never a default.
// Open question: nothing is known to write `PartiallyChecked` through
// normal use. It may be a dead state carried over from the checkbox
// widget's internal encoding. It stays representable so stored values
// decode without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    Unchecked,
    PartiallyChecked,
    #[default]
    Checked,
}

impl CheckState {
    pub fn from_i64(n: i64) -> Option<Self> {
        match n {
            0 => Some(CheckState::Unchecked),
            1 => Some(CheckState::PartiallyChecked),
            2 => Some(CheckState::Checked),
            _ => None,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            CheckState::Unchecked => 0,
            CheckState::PartiallyChecked => 1,
            CheckState::Checked => 2,
        }
    }

    pub fn is_checked(self) -> bool {
        self == CheckState::Checked
    }
}

impl From<CheckState> for SettingValue {
    fn from(state: CheckState) -> Self {
        SettingValue::Integer(state.as_i64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json_shape() {
        let json = serde_json::to_string(&SettingValue::Integer(9000)).unwrap();
        assert_eq!(json, "9000");
        let json = serde_json::to_string(&SettingValue::from("3")).unwrap();
        assert_eq!(json, "\"3\"");

        let parsed: SettingValue = serde_json::from_str("\"128\"").unwrap();
        assert_eq!(parsed, SettingValue::Text("128".into()));
        let parsed: SettingValue = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, SettingValue::Integer(2));
    }

    #[test]
    fn test_as_i64_accepts_string_encoded() {
        assert_eq!(SettingValue::from("512").as_i64(), Some(512));
        assert_eq!(SettingValue::from(" 3 ").as_i64(), Some(3));
        assert_eq!(SettingValue::from("deep").as_i64(), None);
        assert_eq!(SettingValue::from(9000).as_i64(), Some(9000));
    }

    #[test]
    fn test_as_str_only_for_text() {
        assert_eq!(SettingValue::from("127.0.0.1").as_str(), Some("127.0.0.1"));
        assert_eq!(SettingValue::from(1).as_str(), None);
    }

    #[test]
    fn test_empty_text_is_not_absent() {
        let v = SettingValue::from("");
        assert_eq!(v.as_str(), Some(""));
        assert_eq!(v.to_string(), "");
    }

    #[test]
    fn test_check_state_encoding() {
        assert_eq!(CheckState::from_i64(0), Some(CheckState::Unchecked));
        assert_eq!(CheckState::from_i64(1), Some(CheckState::PartiallyChecked));
        assert_eq!(CheckState::from_i64(2), Some(CheckState::Checked));
        assert_eq!(CheckState::from_i64(3), None);
        assert_eq!(CheckState::default().as_i64(), 2);
        assert!(CheckState::Checked.is_checked());
        assert!(!CheckState::PartiallyChecked.is_checked());
        assert_eq!(SettingValue::from(CheckState::Unchecked), SettingValue::Integer(0));
    }
}
