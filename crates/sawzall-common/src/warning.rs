//! Diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer, tree builder and selector engine to report
//! constructs they only partially support.
//!
//! Output is off by default: a library that parses untrusted markup must not
//! write to stderr behind the caller's back. Turn it on with [`set_enabled`]
//! or by exporting `SAWZALL_WARNINGS=1`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Environment variable that enables warnings when set to a non-empty value
/// other than `0`.
pub const WARNINGS_ENV_VAR: &str = "SAWZALL_WARNINGS";

const UNSET: u8 = 0;
const DISABLED: u8 = 1;
const ENABLED: u8 = 2;

/// Tri-state switch; `UNSET` means "consult the environment on first use".
static STATE: AtomicU8 = AtomicU8::new(UNSET);

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Explicitly enable or disable warning output, overriding
/// [`WARNINGS_ENV_VAR`].
pub fn set_enabled(enabled: bool) {
    STATE.store(if enabled { ENABLED } else { DISABLED }, Ordering::Relaxed);
}

/// Whether [`warn_once`] currently prints anything.
#[must_use]
pub fn is_enabled() -> bool {
    match STATE.load(Ordering::Relaxed) {
        ENABLED => true,
        DISABLED => false,
        _ => {
            let enabled = std::env::var(WARNINGS_ENV_VAR)
                .is_ok_and(|value| !value.is_empty() && value != "0");
            // A concurrent set_enabled wins over the environment.
            let _ = STATE.compare_exchange(
                UNSET,
                if enabled { ENABLED } else { DISABLED },
                Ordering::Relaxed,
                Ordering::Relaxed,
            );
            STATE.load(Ordering::Relaxed) == ENABLED
        }
    }
}

/// Warn about an unsupported construct (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML", "foreign content <svg> is parsed as plain HTML");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if !is_enabled() {
        return;
    }

    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Sawzall {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings so they can be printed again.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_enabled_overrides_environment() {
        set_enabled(false);
        assert!(!is_enabled());
        set_enabled(true);
        assert!(is_enabled());
        set_enabled(false);
    }

    #[test]
    fn test_clear_warnings_without_any_recorded() {
        clear_warnings();
        warn_once("Test", "silent while disabled");
        clear_warnings();
    }
}
