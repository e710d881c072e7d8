//! Translatable items: the leaf entities of a translation tree.
//!
//! An item maps locale tags to values of one type `V`, with the reserved
//! [`FALLBACK_KEY`] entry holding the locale-independent default. Entries are
//! kept in insertion order because the resolver's last resort is the first
//! defined value (see [`crate::resolve`]).

/// Reserved locale key holding the locale-independent default value.
pub const FALLBACK_KEY: &str = "fallback";

/// A mapping from locale tag to value, the leaf of a translation tree.
///
/// Only defined entries are stored; "explicitly deleted" exists solely in
/// patches ([`ItemPatch`] entries with `None`). The item is a shallow cell:
/// its values — including function-typed ones — pass through resolution
/// untouched and are never instrumented by any reactivity integration, which
/// only ever observes whole-leaf reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableItem<V> {
    /// Locale entries in insertion order; tags are unique.
    entries: Vec<(String, V)>,
}

impl<V> Default for TranslatableItem<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V> TranslatableItem<V> {
    /// Creates an empty item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an item from `(tag, value)` pairs.
    ///
    /// A tag repeated later in the sequence replaces the earlier value but
    /// keeps the earlier position, like repeated keys in an object literal.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
    {
        let mut item = Self::new();
        for (tag, value) in entries {
            item.set(tag, value);
        }
        item
    }

    /// Returns the value stored for exactly `tag`, if any.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&V> {
        self.entries.iter().find(|(t, _)| t == tag).map(|(_, v)| v)
    }

    /// Returns the locale-independent default, the [`FALLBACK_KEY`] entry.
    #[must_use]
    pub fn fallback(&self) -> Option<&V> {
        self.get(FALLBACK_KEY)
    }

    /// Returns the first-inserted value, the resolver's last resort.
    #[must_use]
    pub fn first_value(&self) -> Option<&V> {
        self.entries.first().map(|(_, v)| v)
    }

    /// Inserts or replaces the value for `tag`, keeping the position of a
    /// replaced entry.
    pub fn set(&mut self, tag: impl Into<String>, value: V) {
        let tag = tag.into();
        if let Some(slot) = self.entries.iter_mut().find(|(t, _)| *t == tag) {
            slot.1 = value;
        } else {
            self.entries.push((tag, value));
        }
    }

    /// Removes the entry for `tag`, returning its value if it was present.
    pub fn remove(&mut self, tag: &str) -> Option<V> {
        let index = self.entries.iter().position(|(t, _)| t == tag)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of defined entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the item has no entries at all (the "unresolvable leaf").
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(tag, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v))
    }

    /// Iterates the tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// Overlays `patch` entry-by-entry, in place.
    ///
    /// `Some(value)` assigns the tag, `None` removes it, tags absent from the
    /// patch are untouched. The item keeps its identity, so shared handles
    /// held by views or callers observe the change.
    pub fn patch(&mut self, patch: ItemPatch<V>) {
        for (tag, value) in patch.entries {
            match value {
                Some(value) => self.set(tag, value),
                None => {
                    self.remove(&tag);
                }
            }
        }
    }
}

/// Entry-level overlay for a [`TranslatableItem`].
///
/// Each entry either assigns a value to a tag or clears the tag. Clearing a
/// region override makes resolution fall through to the shorter prefix again
/// (e.g. clearing `de-DE-BY` re-exposes `de-DE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPatch<V> {
    /// `(tag, Some(value))` assigns, `(tag, None)` clears.
    entries: Vec<(String, Option<V>)>,
}

impl<V> Default for ItemPatch<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V> ItemPatch<V> {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch from `(tag, Option<value>)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<V>)>,
        S: Into<String>,
    {
        Self { entries: entries.into_iter().map(|(t, v)| (t.into(), v)).collect() }
    }

    /// Adds an assignment for `tag`.
    #[must_use]
    pub fn set(mut self, tag: impl Into<String>, value: V) -> Self {
        self.entries.push((tag.into(), Some(value)));
        self
    }

    /// Adds a clear for `tag`.
    #[must_use]
    pub fn clear(mut self, tag: impl Into<String>) -> Self {
        self.entries.push((tag.into(), None));
        self
    }

    /// True when the patch carries no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the patch into a fresh item from its assignments.
    ///
    /// Used when a tree patch addresses a key that does not exist yet: the
    /// new item adopts the defined entries, clears are meaningless there and
    /// are dropped.
    #[must_use]
    pub fn into_item(self) -> TranslatableItem<V> {
        TranslatableItem::from_entries(
            self.entries.into_iter().filter_map(|(t, v)| v.map(|v| (t, v))),
        )
    }
}
