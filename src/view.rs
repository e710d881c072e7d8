//! Read-only resolved views over translation trees.
//!
//! A [`TreeView`] wraps a branch handle and resolves on access: reading a key
//! that holds an item yields the item's value for the active locale
//! preference, reading a nested branch yields a child view, and plain values
//! pass through. Every read goes to the live node — nothing is cached — and
//! reports the dotted path to the tree's [`ReactiveHooks`], so an attached
//! reactive system tracks dependencies exactly as for a direct read.

use std::fmt;
use std::rc::Rc;

use crate::{
    reactive::ReactiveHooks,
    resolve::resolve_preferred,
    tree::{BranchRef, TranslationTree, TreeNode},
};

impl<V> TranslationTree<V> {
    /// Returns a resolving view rooted at this tree's root branch.
    #[must_use]
    pub fn view(&self) -> TreeView<V> {
        TreeView {
            node: self.root(),
            hooks: self.hooks(),
            path: Vec::new(),
        }
    }
}

/// Read-only view of one branch of a translation tree.
///
/// Views are cheap to clone and hold no resolved state of their own; two
/// views over the same branch observe the same live contents.
pub struct TreeView<V> {
    node: BranchRef<V>,
    hooks: Rc<dyn ReactiveHooks>,
    path: Vec<String>,
}

/// Outcome of reading one key through a [`TreeView`].
#[derive(Debug)]
pub enum Resolved<V> {
    /// The key held an item with a resolvable value, or a plain value.
    Value(V),
    /// The key held a nested branch.
    Tree(TreeView<V>),
    /// The key held an item with no entries at all.
    Unresolved,
    /// The key does not exist; carries a placeholder naming the missing path.
    Unknown(UnknownPath),
}

impl<V> TreeView<V> {
    /// Shared handle to the underlying branch, bypassing resolution and
    /// hooks. Mutations through this handle are visible to every view.
    #[must_use]
    pub fn raw(&self) -> BranchRef<V> {
        Rc::clone(&self.node)
    }

    /// Keys of the underlying branch in insertion order.
    ///
    /// Enumerating counts as a read of the branch itself and is reported to
    /// the hooks under the branch's own path (empty at the root).
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.hooks.track_read(&self.path.join("."));
        self.node
            .borrow()
            .keys()
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Reads one key, resolving items against the active locale preference.
    ///
    /// Missing keys yield [`Resolved::Unknown`] and log a warning naming the
    /// full path from the root.
    #[must_use]
    pub fn get(&self, key: &str) -> Resolved<V>
    where
        V: Clone,
    {
        self.hooks.track_read(&self.child_path(key));
        let node = self.node.borrow().get(key).cloned();
        match node {
            Some(TreeNode::Item(item)) => {
                let item = item.borrow();
                match resolve_preferred(&item) {
                    Some(value) => Resolved::Value(value.clone()),
                    None => Resolved::Unresolved,
                }
            }
            Some(TreeNode::Branch(branch)) => Resolved::Tree(TreeView {
                node: branch,
                hooks: Rc::clone(&self.hooks),
                path: self.child_segments(key),
            }),
            Some(TreeNode::Value(value)) => Resolved::Value(value),
            None => {
                tracing::warn!("Translation key not found: {}", self.child_path(key));
                Resolved::Unknown(UnknownPath::new(key))
            }
        }
    }

    /// Reads a `.`-separated path, descending one key at a time.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Resolved<V>
    where
        V: Clone,
    {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = self.get(first);
        for segment in segments {
            current = current.get(segment);
        }
        current
    }

    pub(crate) fn hooks(&self) -> Rc<dyn ReactiveHooks> {
        Rc::clone(&self.hooks)
    }

    pub(crate) fn path_segments(&self) -> &[String] {
        &self.path
    }

    fn child_segments(&self, key: &str) -> Vec<String> {
        let mut segments = self.path.clone();
        segments.push(key.to_owned());
        segments
    }

    fn child_path(&self, key: &str) -> String {
        self.child_segments(key).join(".")
    }
}

impl<V> Clone for TreeView<V> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
            hooks: Rc::clone(&self.hooks),
            path: self.path.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for TreeView<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeView")
            .field("node", &self.node)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<V> Resolved<V> {
    /// Continues reading below this result.
    ///
    /// Descends into [`Resolved::Tree`]; on [`Resolved::Unknown`] it extends
    /// the placeholder path, so a whole missing chain stays chainable and
    /// prints as one placeholder. Reading below a value or an unresolved item
    /// starts a fresh unknown chain at `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Resolved<V>
    where
        V: Clone,
    {
        match self {
            Self::Tree(view) => view.get(key),
            Self::Unknown(path) => Resolved::Unknown(path.child(key)),
            Self::Value(_) | Self::Unresolved => {
                tracing::warn!("Translation key read below a leaf: {}", key);
                Resolved::Unknown(UnknownPath::new(key))
            }
        }
    }

    /// The resolved value, if any.
    #[must_use]
    pub fn as_value(&self) -> Option<&V> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the result, returning the resolved value if any.
    #[must_use]
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the result, returning the child view if the key held a
    /// branch.
    #[must_use]
    pub fn into_tree(self) -> Option<TreeView<V>> {
        match self {
            Self::Tree(view) => Some(view),
            _ => None,
        }
    }

    /// Whether the key was missing.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Whether the key held an item with no entries.
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }
}

/// Placeholder for a missing key, printable in place of a translation.
///
/// Only the missing suffix of the path is recorded; the leading `*` stands
/// for whatever known prefix was read before the chain left the tree.
///
/// # Examples
/// ```
/// use i18n_tree::{Branch, Resolved, TranslationTree};
///
/// let tree: TranslationTree<String> = TranslationTree::new(Branch::new());
///
/// match tree.view().get("bad").get("path") {
///     Resolved::Unknown(placeholder) => {
///         assert_eq!(placeholder.to_string(), "[*.bad.path]");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPath {
    segments: Vec<String>,
}

impl UnknownPath {
    pub(crate) fn new(key: &str) -> Self {
        Self {
            segments: vec![key.to_owned()],
        }
    }

    /// Extends the placeholder with one more missing segment.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_owned());
        Self { segments }
    }

    /// The missing segments joined with `.`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for UnknownPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[*.{}]", self.path())
    }
}
