//! Fallback resolution over translatable items.
//!
//! The resolver walks an ordered locale list and, per tag, tries the exact
//! tag followed by progressively shorter prefixes (`de-DE-BY` → `de-DE` →
//! `de`). When no tag matches it falls back to the item's `"fallback"` entry
//! and finally to the first-inserted value. An item with no entries resolves
//! to `None` — that is the caller's "no value", never an error.

use crate::item::TranslatableItem;
use crate::locales::preferred_locales;

/// Yields `tag` followed by each truncation at a trailing `-` boundary,
/// rightmost first.
///
/// A truncation position of 0 terminates the sequence, so a tag without an
/// interior hyphen has no shorter candidates.
///
/// # Examples
/// ```
/// use i18n_tree::resolve::locale_candidates;
///
/// let candidates: Vec<&str> = locale_candidates("de-DE-BY").collect();
/// assert_eq!(candidates, vec!["de-DE-BY", "de-DE", "de"]);
/// ```
pub fn locale_candidates(tag: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(tag);
    std::iter::from_fn(move || {
        let current = next?;
        next = match current.rfind('-') {
            Some(index) if index > 0 => current.get(..index),
            _ => None,
        };
        Some(current)
    })
}

/// Exact-then-prefix lookup for a single locale tag.
fn lookup<'a, V>(item: &'a TranslatableItem<V>, tag: &str) -> Option<&'a V> {
    locale_candidates(tag).find_map(|candidate| item.get(candidate))
}

/// Resolves the best-matching value of `item` for the ordered `locales`.
///
/// First match wins: each tag is tried (with its prefixes) before the next
/// tag in the list. With no match — or an empty list — the `"fallback"`
/// entry is used, then the first-inserted value. A present entry always
/// terminates the search, even when the value is an empty string.
pub fn resolve<'a, V, I, S>(item: &'a TranslatableItem<V>, locales: I) -> Option<&'a V>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for tag in locales {
        if let Some(value) = lookup(item, tag.as_ref()) {
            return Some(value);
        }
    }

    item.fallback().or_else(|| item.first_value())
}

/// Resolves `item` against the current locale preference.
///
/// Reads [`preferred_locales`] at call time, so scoped overrides and
/// configuration changes are always honored.
pub fn resolve_preferred<V>(item: &TranslatableItem<V>) -> Option<&V> {
    resolve(item, preferred_locales())
}

impl<V> TranslatableItem<V> {
    /// Resolves this item for the given ordered locale list; see
    /// [`resolve`].
    pub fn resolve<'a, I, S>(&'a self, locales: I) -> Option<&'a V>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        resolve(self, locales)
    }

    /// Resolves this item for the current locale preference.
    #[must_use]
    pub fn resolve_preferred(&self) -> Option<&V> {
        resolve_preferred(self)
    }
}
