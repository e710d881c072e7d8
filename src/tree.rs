//! Translation trees.
//!
//! A tree is a nesting of [`Branch`] nodes whose edges carry [`TreeNode`]s:
//! translatable items resolved per locale on read, nested branches, or plain
//! locale-independent values. Item and branch nodes are shared handles
//! ([`Rc<RefCell<_>>`]), so a node obtained from the tree stays the same
//! object across patches — only its contents change.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{
    item::TranslatableItem,
    reactive::{NoopHooks, ReactiveHooks},
};

/// Shared handle to a translatable item leaf.
pub type ItemRef<V> = Rc<RefCell<TranslatableItem<V>>>;

/// Shared handle to a branch node.
pub type BranchRef<V> = Rc<RefCell<Branch<V>>>;

/// A single node of a translation tree.
///
/// Cloning a node is shallow: item and branch handles are shared, so a clone
/// observes later mutations of the same node. Only [`TreeNode::Value`] clones
/// its payload.
#[derive(Debug, Clone)]
pub enum TreeNode<V> {
    /// Leaf of locale-tagged values, resolved against the active preference
    /// list on every read.
    Item(ItemRef<V>),
    /// Nested subtree.
    Branch(BranchRef<V>),
    /// Locale-independent value passed through unchanged.
    Value(V),
}

impl<V> TreeNode<V> {
    /// Wraps an item into a shared leaf node.
    #[must_use]
    pub fn item(item: TranslatableItem<V>) -> Self {
        Self::Item(Rc::new(RefCell::new(item)))
    }

    /// Wraps a branch into a shared subtree node.
    #[must_use]
    pub fn branch(branch: Branch<V>) -> Self {
        Self::Branch(Rc::new(RefCell::new(branch)))
    }

    /// Node kind name used in diagnostics.
    #[must_use]
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::Branch(_) => "branch",
            Self::Value(_) => "value",
        }
    }
}

/// Insertion-ordered mapping from key to child node.
#[derive(Debug, Clone)]
pub struct Branch<V> {
    entries: Vec<(String, TreeNode<V>)>,
}

impl<V> Default for Branch<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Branch<V> {
    /// Creates an empty branch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a branch from `(key, node)` pairs, keeping first-seen key order.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, TreeNode<V>)>,
        S: Into<String>,
    {
        let mut branch = Self::new();
        for (key, node) in entries {
            branch.insert(key, node);
        }
        branch
    }

    /// Returns the node stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TreeNode<V>> {
        self.entries
            .iter()
            .find_map(|(tag, node)| (tag == key).then_some(node))
    }

    /// Inserts or replaces the node under `key`.
    ///
    /// Replacing keeps the key's original position so enumeration order stays
    /// stable across updates.
    pub fn insert<S: Into<String>>(&mut self, key: S, node: TreeNode<V>) {
        let key = key.into();
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find_map(|(tag, existing)| (*tag == key).then_some(existing))
        {
            *slot = node;
        } else {
            self.entries.push((key, node));
        }
    }

    /// Iterates `(key, node)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TreeNode<V>)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the branch has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A live translation tree: the shared root branch plus the reactive hooks
/// every derived view reports reads and mutations to.
pub struct TranslationTree<V> {
    root: BranchRef<V>,
    hooks: Rc<dyn ReactiveHooks>,
}

impl<V> TranslationTree<V> {
    /// Creates a tree without reactive instrumentation.
    #[must_use]
    pub fn new(root: Branch<V>) -> Self {
        Self::with_hooks(root, Rc::new(NoopHooks))
    }

    /// Creates a tree whose views report reads and mutations to `hooks`.
    #[must_use]
    pub fn with_hooks(root: Branch<V>, hooks: Rc<dyn ReactiveHooks>) -> Self {
        Self {
            root: Rc::new(RefCell::new(root)),
            hooks,
        }
    }

    /// Builds a tree directly from root `(key, node)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, TreeNode<V>)>,
        S: Into<String>,
    {
        Self::new(Branch::from_entries(entries))
    }

    /// Shared handle to the root branch, bypassing resolution and hooks.
    #[must_use]
    pub fn root(&self) -> BranchRef<V> {
        Rc::clone(&self.root)
    }

    pub(crate) fn hooks(&self) -> Rc<dyn ReactiveHooks> {
        Rc::clone(&self.hooks)
    }
}

impl<V> Clone for TranslationTree<V> {
    fn clone(&self) -> Self {
        Self {
            root: Rc::clone(&self.root),
            hooks: Rc::clone(&self.hooks),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for TranslationTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationTree")
            .field("root", &self.root)
            .field("hooks", &"<dyn ReactiveHooks>")
            .finish()
    }
}
