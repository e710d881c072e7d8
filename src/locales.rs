//! Locale preference source.
//!
//! Holds the process-wide ordered locale preference and the thread-local
//! scoped override used by [`with_locales`]. Resolution (see
//! [`crate::resolve`]) always consults [`preferred_locales`] at read time, so
//! changing the preference immediately affects every subsequent read.

use std::cell::RefCell;
use std::sync::{
    LazyLock,
    PoisonError,
    RwLock,
};

use crate::item::FALLBACK_KEY;

/// Application-configured locales, highest priority after overrides.
static CONFIGURED_LOCALES: LazyLock<RwLock<Vec<String>>> =
    LazyLock::new(|| RwLock::new(Vec::new()));

/// Locales reported by the host environment, detected once and overridable.
static HOST_LOCALES: LazyLock<RwLock<Vec<String>>> =
    LazyLock::new(|| RwLock::new(detect_host_locales()));

/// Last-resort locales appended after configured and host lists.
static FALLBACK_LOCALES: LazyLock<RwLock<Vec<String>>> =
    LazyLock::new(|| RwLock::new(vec!["en".to_string()]));

thread_local! {
    /// Stack of scoped overrides for this thread; the innermost entry wins.
    static OVERRIDE_STACK: RefCell<Vec<Vec<String>>> = const { RefCell::new(Vec::new()) };
}

/// Reads a global list without panicking on a poisoned lock.
fn read_list(list: &RwLock<Vec<String>>) -> Vec<String> {
    list.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Replaces the contents of a global list.
fn write_list(list: &RwLock<Vec<String>>, locales: Vec<String>) {
    *list.write().unwrap_or_else(PoisonError::into_inner) = locales;
}

/// Sets the application-configured locales.
///
/// Visible to all threads and all subsequent resolutions.
pub fn set_locales<I, S>(locales: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    write_list(&CONFIGURED_LOCALES, locales.into_iter().map(Into::into).collect());
}

/// Sets the last-resort locales (defaults to `["en"]`).
pub fn set_fallback_locales<I, S>(locales: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    write_list(&FALLBACK_LOCALES, locales.into_iter().map(Into::into).collect());
}

/// Replaces the host-reported locales.
///
/// The default is detected from the environment on first use; tests and
/// embedders that need determinism should set this explicitly.
pub fn set_host_locales<I, S>(locales: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    write_list(&HOST_LOCALES, locales.into_iter().map(Into::into).collect());
}

/// Returns the current locale preference, in priority order.
///
/// An active [`with_locales`] override replaces the whole list; otherwise the
/// result is the concatenation of the configured, host-reported and fallback
/// lists. May be empty, in which case resolution skips straight to the
/// `"fallback"` entry of each item.
#[must_use]
pub fn preferred_locales() -> Vec<String> {
    let overridden = OVERRIDE_STACK.with(|stack| stack.borrow().last().cloned());
    if let Some(locales) = overridden {
        return locales;
    }

    let mut ordered = read_list(&CONFIGURED_LOCALES);
    ordered.extend(read_list(&HOST_LOCALES));
    ordered.extend(read_list(&FALLBACK_LOCALES));
    ordered
}

/// Returns the highest-priority locale tag, or the reserved `"fallback"` key
/// name when no locale is preferred at all.
///
/// Single-locale writes (see [`crate::patch::patch_locale`]) use this as the
/// target tag, so with an empty preference they address the fallback entry.
#[must_use]
pub fn primary_locale() -> String {
    preferred_locales().into_iter().next().unwrap_or_else(|| FALLBACK_KEY.to_string())
}

/// Pops the pushed override when the scope ends, on every exit path.
struct OverrideGuard;

impl Drop for OverrideGuard {
    fn drop(&mut self) {
        OVERRIDE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Runs `f` with `locales` as the sole active preference.
///
/// Overrides stack: a nested call wins over the outer one for its duration.
/// The previous state is restored when `f` returns, and also when it panics
/// (the override is released by a guard, not by straight-line code).
///
/// # Examples
/// ```
/// use i18n_tree::locales::{preferred_locales, with_locales};
///
/// let inner = with_locales(["de-DE"], preferred_locales);
/// assert_eq!(inner, vec!["de-DE".to_string()]);
/// ```
pub fn with_locales<T, I, S>(locales: I, f: impl FnOnce() -> T) -> T
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
    OVERRIDE_STACK.with(|stack| stack.borrow_mut().push(locales));
    let _guard = OverrideGuard;
    f()
}

/// Detects the host locale list from the environment.
///
/// Inspects `LANGUAGE`, `LC_ALL`, `LC_MESSAGES` and `LANG` in that order and
/// uses the first non-empty variable. `LANGUAGE` may carry a `:`-separated
/// list; the others a single tag. Encoding suffixes (`.UTF-8`) and modifiers
/// (`@euro`) are stripped, `_` is normalized to `-`, and the special `C` /
/// `POSIX` locales are ignored.
fn detect_host_locales() -> Vec<String> {
    for var in ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"] {
        let Ok(value) = std::env::var(var) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let tags: Vec<String> = value.split(':').filter_map(normalize_env_tag).collect();
        if !tags.is_empty() {
            return tags;
        }
    }
    Vec::new()
}

/// Normalizes one environment locale entry to a hyphenated tag.
fn normalize_env_tag(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next().unwrap_or(raw).trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}
