//! CLI Exit Code Registry
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | Key absent (`get`, `has`) or has no default     |
//! | 2    | Usage error (malformed key, bad value)          |
//! | 3    | Settings store could not be read or written     |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// The key has never been written, or `reset` found no default for it.
/// Like `grep(1)`, exit 1 means "nothing found", not a failure.
pub const EXIT_ABSENT: u8 = 1;

/// Usage error - malformed key, `--int` with a non-integer value.
pub const EXIT_USAGE: u8 = 2;

/// Store error - document unreadable, corrupt, or not writable.
pub const EXIT_STORE: u8 = 3;
