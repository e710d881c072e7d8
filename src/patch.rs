//! パッチ適用モジュール
//!
//! 翻訳ツリーを丸ごと置き換えるのではなく、差分だけを既存ノードへ
//! マージします。ノードのハンドルは維持されるため、ツリーへの参照を
//! 保持している側からは内容だけが変わって見えます。適用前に形状を
//! 検証し、不一致があればツリーへ一切書き込まずにエラーを返します。

use crate::{
    item::{ItemPatch, TranslatableItem},
    locales::{primary_locale, with_locales},
    reactive::ReactiveHooks,
    tree::{Branch, BranchRef, TreeNode},
    view::TreeView,
};

/// Error applying a patch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// A patch entry and the node it addresses disagree about the node's
    /// kind, e.g. a branch patch aimed at an item leaf.
    #[error("patch shape mismatch at '{path}': cannot apply a {patch} patch to a {node} node")]
    ShapeMismatch {
        /// Dotted path of the mismatching node, from the tree root.
        path: String,
        /// Kind of the existing node.
        node: &'static str,
        /// Kind of the patch entry.
        patch: &'static str,
    },
}

/// One entry of a [`PatchTree`], mirroring the node kinds of the tree.
#[derive(Debug, Clone)]
pub enum PatchNode<V> {
    /// Entry-level merge into an item leaf.
    Item(ItemPatch<V>),
    /// Recursive patch of a nested branch.
    Branch(PatchTree<V>),
    /// Replacement for a plain value node.
    Value(V),
}

impl<V> PatchNode<V> {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::Branch(_) => "branch",
            Self::Value(_) => "value",
        }
    }
}

/// A sparse description of changes to a branch.
///
/// Keys absent from the patch are left untouched; to clear an item entry,
/// include it in an [`ItemPatch`] with [`ItemPatch::clear`].
#[derive(Debug, Clone)]
pub struct PatchTree<V> {
    entries: Vec<(String, PatchNode<V>)>,
}

impl<V> Default for PatchTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PatchTree<V> {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a patch from `(key, node)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PatchNode<V>)>,
        S: Into<String>,
    {
        let mut patch = Self::new();
        for (key, node) in entries {
            patch.set(key.into(), node);
        }
        patch
    }

    /// Adds an item patch under `key`.
    #[must_use]
    pub fn item<S: Into<String>>(mut self, key: S, patch: ItemPatch<V>) -> Self {
        self.set(key.into(), PatchNode::Item(patch));
        self
    }

    /// Adds a nested branch patch under `key`.
    #[must_use]
    pub fn branch<S: Into<String>>(mut self, key: S, patch: Self) -> Self {
        self.set(key.into(), PatchNode::Branch(patch));
        self
    }

    /// Adds a plain value replacement under `key`.
    #[must_use]
    pub fn value<S: Into<String>>(mut self, key: S, value: V) -> Self {
        self.set(key.into(), PatchNode::Value(value));
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, key: String, node: PatchNode<V>) {
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
}

/// Merges `patches` into the tree behind `view`.
///
/// Existing item and branch handles are kept; only their contents change.
/// Keys new to the tree are adopted: item patches become fresh items, branch
/// patches fresh subtrees. The whole patch is validated against the tree
/// first, so a [`PatchError::ShapeMismatch`] leaves the tree untouched.
/// Every mutated leaf is reported to the tree's hooks under its full path.
pub fn patch<V: Clone>(view: &TreeView<V>, patches: PatchTree<V>) -> Result<(), PatchError> {
    let root = view.raw();
    let mut path = view.path_segments().to_vec();
    validate_tree(&root, &patches, &mut path)?;
    let hooks = view.hooks();
    apply_tree(&root, patches, hooks.as_ref(), &mut path)
}

fn validate_tree<V>(
    branch: &BranchRef<V>,
    patches: &PatchTree<V>,
    path: &mut Vec<String>,
) -> Result<(), PatchError> {
    let node = branch.borrow();
    for (key, patch_node) in &patches.entries {
        match (node.get(key), patch_node) {
            (None, _)
            | (Some(TreeNode::Item(_)), PatchNode::Item(_))
            | (Some(TreeNode::Value(_)), PatchNode::Value(_)) => {}
            (Some(TreeNode::Branch(child)), PatchNode::Branch(sub)) => {
                path.push(key.clone());
                let result = validate_tree(child, sub, path);
                path.pop();
                result?;
            }
            (Some(existing), patch_node) => {
                path.push(key.clone());
                let error = PatchError::ShapeMismatch {
                    path: path.join("."),
                    node: existing.kind(),
                    patch: patch_node.kind(),
                };
                path.pop();
                return Err(error);
            }
        }
    }
    Ok(())
}

fn apply_tree<V: Clone>(
    branch: &BranchRef<V>,
    patches: PatchTree<V>,
    hooks: &dyn ReactiveHooks,
    path: &mut Vec<String>,
) -> Result<(), PatchError> {
    for (key, patch_node) in patches.entries {
        path.push(key.clone());
        // Look up outside the match so no borrow is held while mutating or
        // while hooks run.
        let existing = branch.borrow().get(&key).cloned();
        let result = apply_node(branch, &key, existing, patch_node, hooks, path);
        path.pop();
        result?;
    }
    Ok(())
}

fn apply_node<V: Clone>(
    parent: &BranchRef<V>,
    key: &str,
    existing: Option<TreeNode<V>>,
    patch_node: PatchNode<V>,
    hooks: &dyn ReactiveHooks,
    path: &mut Vec<String>,
) -> Result<(), PatchError> {
    match (existing, patch_node) {
        (Some(TreeNode::Item(item)), PatchNode::Item(item_patch)) => {
            item.borrow_mut().patch(item_patch);
            hooks.trigger(&path.join("."));
            Ok(())
        }
        (Some(TreeNode::Branch(child)), PatchNode::Branch(sub)) => {
            apply_tree(&child, sub, hooks, path)
        }
        (Some(TreeNode::Value(_)), PatchNode::Value(value)) => {
            parent.borrow_mut().insert(key, TreeNode::Value(value));
            hooks.trigger(&path.join("."));
            Ok(())
        }
        (None, patch_node) => {
            let mut touched = Vec::new();
            let node = adopt(patch_node, path, &mut touched);
            parent.borrow_mut().insert(key, node);
            for leaf in touched {
                hooks.trigger(&leaf);
            }
            Ok(())
        }
        // Validation makes this unreachable unless the same branch handle is
        // mounted twice inside the patched region and an earlier write
        // changed its shape.
        (Some(existing), patch_node) => Err(PatchError::ShapeMismatch {
            path: path.join("."),
            node: existing.kind(),
            patch: patch_node.kind(),
        }),
    }
}

fn adopt<V>(patch_node: PatchNode<V>, path: &mut Vec<String>, touched: &mut Vec<String>) -> TreeNode<V> {
    match patch_node {
        PatchNode::Item(item_patch) => {
            touched.push(path.join("."));
            TreeNode::item(item_patch.into_item())
        }
        PatchNode::Value(value) => {
            touched.push(path.join("."));
            TreeNode::Value(value)
        }
        PatchNode::Branch(sub) => {
            let mut branch = Branch::new();
            for (key, child) in sub.entries {
                path.push(key.clone());
                let node = adopt(child, path, touched);
                path.pop();
                branch.insert(key, node);
            }
            TreeNode::branch(branch)
        }
    }
}

/// One entry of a [`LocalePatch`]: either a value for the target locale or a
/// nested patch.
#[derive(Debug, Clone)]
pub enum LocalePatchNode<V> {
    /// Value written to the target locale of an item leaf.
    Value(V),
    /// Recursive patch of a nested branch.
    Branch(LocalePatch<V>),
}

impl<V> LocalePatchNode<V> {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "locale value",
            Self::Branch(_) => "branch",
        }
    }
}

/// A sparse set of values for a single locale, shaped like the tree.
#[derive(Debug, Clone)]
pub struct LocalePatch<V> {
    entries: Vec<(String, LocalePatchNode<V>)>,
}

impl<V> Default for LocalePatch<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LocalePatch<V> {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a patch from `(key, node)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, LocalePatchNode<V>)>,
        S: Into<String>,
    {
        let mut patch = Self::new();
        for (key, node) in entries {
            patch.set(key.into(), node);
        }
        patch
    }

    /// Adds a value for `key`.
    #[must_use]
    pub fn value<S: Into<String>>(mut self, key: S, value: V) -> Self {
        self.set(key.into(), LocalePatchNode::Value(value));
        self
    }

    /// Adds a nested patch under `key`.
    #[must_use]
    pub fn branch<S: Into<String>>(mut self, key: S, patch: Self) -> Self {
        self.set(key.into(), LocalePatchNode::Branch(patch));
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push_entry(&mut self, key: String, node: LocalePatchNode<V>) {
        self.set(key, node);
    }

    fn set(&mut self, key: String, node: LocalePatchNode<V>) {
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
}

/// Writes the values of `patches` under a single locale tag.
///
/// `locale` of `None` targets the primary locale of the active preference
/// list. Existing items get the value set for that one tag; missing keys are
/// created as fresh items holding only that tag. Internally the target is
/// pushed as a scoped override, so the per-leaf writes address exactly that
/// locale.
pub fn patch_locale<V: Clone>(
    view: &TreeView<V>,
    locale: Option<&str>,
    patches: LocalePatch<V>,
) -> Result<(), PatchError> {
    let target = locale.map_or_else(primary_locale, ToOwned::to_owned);
    tracing::debug!("Applying locale patch for: {}", target);
    with_locales([target], || {
        let root = view.raw();
        let mut path = view.path_segments().to_vec();
        validate_locale(&root, &patches, &mut path)?;
        let hooks = view.hooks();
        apply_locale(&root, patches, hooks.as_ref(), &mut path)
    })
}

fn validate_locale<V>(
    branch: &BranchRef<V>,
    patches: &LocalePatch<V>,
    path: &mut Vec<String>,
) -> Result<(), PatchError> {
    let node = branch.borrow();
    for (key, patch_node) in &patches.entries {
        match (node.get(key), patch_node) {
            (None, _) | (Some(TreeNode::Item(_)), LocalePatchNode::Value(_)) => {}
            (Some(TreeNode::Branch(child)), LocalePatchNode::Branch(sub)) => {
                path.push(key.clone());
                let result = validate_locale(child, sub, path);
                path.pop();
                result?;
            }
            (Some(existing), patch_node) => {
                path.push(key.clone());
                let error = PatchError::ShapeMismatch {
                    path: path.join("."),
                    node: existing.kind(),
                    patch: patch_node.kind(),
                };
                path.pop();
                return Err(error);
            }
        }
    }
    Ok(())
}

fn apply_locale<V: Clone>(
    branch: &BranchRef<V>,
    patches: LocalePatch<V>,
    hooks: &dyn ReactiveHooks,
    path: &mut Vec<String>,
) -> Result<(), PatchError> {
    for (key, patch_node) in patches.entries {
        path.push(key.clone());
        let existing = branch.borrow().get(&key).cloned();
        let result = match (existing, patch_node) {
            (Some(TreeNode::Item(item)), LocalePatchNode::Value(value)) => {
                item.borrow_mut().set(primary_locale(), value);
                hooks.trigger(&path.join("."));
                Ok(())
            }
            (Some(TreeNode::Branch(child)), LocalePatchNode::Branch(sub)) => {
                apply_locale(&child, sub, hooks, path)
            }
            (None, patch_node) => {
                let mut touched = Vec::new();
                let node = adopt_locale(patch_node, path, &mut touched);
                branch.borrow_mut().insert(key.clone(), node);
                for leaf in touched {
                    hooks.trigger(&leaf);
                }
                Ok(())
            }
            (Some(existing), patch_node) => Err(PatchError::ShapeMismatch {
                path: path.join("."),
                node: existing.kind(),
                patch: patch_node.kind(),
            }),
        };
        path.pop();
        result?;
    }
    Ok(())
}

fn adopt_locale<V>(
    patch_node: LocalePatchNode<V>,
    path: &mut Vec<String>,
    touched: &mut Vec<String>,
) -> TreeNode<V> {
    match patch_node {
        LocalePatchNode::Value(value) => {
            let mut item = TranslatableItem::new();
            item.set(primary_locale(), value);
            touched.push(path.join("."));
            TreeNode::item(item)
        }
        LocalePatchNode::Branch(sub) => {
            let mut branch = Branch::new();
            for (key, child) in sub.entries {
                path.push(key.clone());
                let node = adopt_locale(child, path, touched);
                path.pop();
                branch.insert(key, node);
            }
            TreeNode::branch(branch)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

    use std::rc::Rc;

    use googletest::prelude::*;

    use super::*;
    use crate::{
        locales::with_locales,
        test_utils::RecordingHooks,
        tree::TranslationTree,
    };

    fn sample_tree() -> TranslationTree<&'static str> {
        TranslationTree::from_entries([
            (
                "main",
                TreeNode::item(TranslatableItem::from_entries([
                    ("nl", "Nederlands"),
                    ("de-DE", "Deutsch"),
                    ("fallback", "English"),
                ])),
            ),
            (
                "multi",
                TreeNode::branch(Branch::from_entries([(
                    "level",
                    TreeNode::item(TranslatableItem::from_entries([("fallback", "deep")])),
                )])),
            ),
            ("version", TreeNode::Value("1.2.3")),
        ])
    }

    fn item_handle(view: &TreeView<&'static str>, key: &str) -> crate::tree::ItemRef<&'static str> {
        match view.raw().borrow().get(key) {
            Some(TreeNode::Item(item)) => Rc::clone(item),
            other => panic!("expected an item under '{key}', got {other:?}"),
        }
    }

    fn branch_handle(
        view: &TreeView<&'static str>,
        key: &str,
    ) -> crate::tree::BranchRef<&'static str> {
        match view.raw().borrow().get(key) {
            Some(TreeNode::Branch(branch)) => Rc::clone(branch),
            other => panic!("expected a branch under '{key}', got {other:?}"),
        }
    }

    #[googletest::test]
    fn patch_merges_item_entries_in_place() {
        let tree = sample_tree();
        let view = tree.view();
        let before = item_handle(&view, "main");

        let result = patch(
            &view,
            PatchTree::new().item(
                "main",
                ItemPatch::new()
                    .set("nl", "Nederlands 2")
                    .set("de-DE-NW", "Nordrhein Westfalen"),
            ),
        );
        assert!(result.is_ok());

        // Same leaf object, merged contents.
        assert!(Rc::ptr_eq(&before, &item_handle(&view, "main")));
        with_locales(["nl"], || {
            assert_that!(view.get("main").into_value(), some(eq("Nederlands 2")));
        });
        with_locales(["de-DE"], || {
            assert_that!(view.get("main").into_value(), some(eq("Deutsch")));
        });
        with_locales(["de-DE-NW"], || {
            assert_that!(
                view.get("main").into_value(),
                some(eq("Nordrhein Westfalen"))
            );
        });
    }

    #[googletest::test]
    fn patch_descends_into_branches() {
        let tree = sample_tree();
        let view = tree.view();
        let before = branch_handle(&view, "multi");

        let result = patch(
            &view,
            PatchTree::new().branch(
                "multi",
                PatchTree::new().item("level", ItemPatch::new().set("nl", "diep")),
            ),
        );
        assert!(result.is_ok());

        assert!(Rc::ptr_eq(&before, &branch_handle(&view, "multi")));
        with_locales(["nl"], || {
            assert_that!(view.get_path("multi.level").into_value(), some(eq("diep")));
        });
        with_locales(["it"], || {
            assert_that!(view.get_path("multi.level").into_value(), some(eq("deep")));
        });
    }

    #[googletest::test]
    fn patch_clears_item_entries() {
        let tree = sample_tree();
        let view = tree.view();

        let result = patch(
            &view,
            PatchTree::new().item("main", ItemPatch::new().clear("nl")),
        );
        assert!(result.is_ok());

        // With the entry gone, resolution falls through to the fallback.
        with_locales(["nl"], || {
            assert_that!(view.get("main").into_value(), some(eq("English")));
        });
    }

    #[googletest::test]
    fn patch_adopts_keys_new_to_the_tree() {
        let tree = sample_tree();
        let view = tree.view();

        let result = patch(
            &view,
            PatchTree::new()
                .item("fresh", ItemPatch::new().set("fallback", "brand new"))
                .branch(
                    "section",
                    PatchTree::new()
                        .item("title", ItemPatch::new().set("fallback", "Title"))
                        .value("count", "3"),
                ),
        );
        assert!(result.is_ok());

        with_locales(["it"], || {
            assert_that!(view.get("fresh").into_value(), some(eq("brand new")));
            assert_that!(
                view.get_path("section.title").into_value(),
                some(eq("Title"))
            );
            assert_that!(view.get_path("section.count").into_value(), some(eq("3")));
        });
    }

    #[googletest::test]
    fn patch_replaces_plain_values() {
        let tree = sample_tree();
        let view = tree.view();

        let result = patch(&view, PatchTree::new().value("version", "2.0.0"));
        assert!(result.is_ok());

        assert_that!(view.get("version").into_value(), some(eq("2.0.0")));
    }

    #[googletest::test]
    fn shape_mismatch_leaves_the_tree_untouched() {
        let tree = sample_tree();
        let view = tree.view();

        // The value patch would apply cleanly, but the branch patch aimed at
        // an item leaf must abort the whole call first.
        let result = patch(
            &view,
            PatchTree::new()
                .value("version", "9.9.9")
                .branch("main", PatchTree::new()),
        );

        match result {
            Err(PatchError::ShapeMismatch { path, node, patch }) => {
                assert_that!(path, eq("main"));
                assert_that!(node, eq("item"));
                assert_that!(patch, eq("branch"));
            }
            Ok(()) => panic!("expected a shape mismatch"),
        }
        assert_that!(view.get("version").into_value(), some(eq("1.2.3")));
    }

    #[googletest::test]
    fn mismatch_path_is_reported_from_the_root() {
        let tree = sample_tree();
        let view = tree.view();

        let result = patch(
            &view,
            PatchTree::new().branch("multi", PatchTree::new().value("level", "x")),
        );

        match result {
            Err(PatchError::ShapeMismatch { path, node, patch }) => {
                assert_that!(path, eq("multi.level"));
                assert_that!(node, eq("item"));
                assert_that!(patch, eq("value"));
            }
            Ok(()) => panic!("expected a shape mismatch"),
        }
    }

    #[googletest::test]
    fn triggers_fire_per_mutated_leaf() {
        let hooks = Rc::new(RecordingHooks::default());
        let tree = TranslationTree::with_hooks(
            Branch::from_entries([
                (
                    "main",
                    TreeNode::item(TranslatableItem::from_entries([("fallback", "one")])),
                ),
                (
                    "multi",
                    TreeNode::branch(Branch::from_entries([(
                        "level",
                        TreeNode::item(TranslatableItem::from_entries([("fallback", "two")])),
                    )])),
                ),
            ]),
            Rc::<RecordingHooks>::clone(&hooks),
        );
        let view = tree.view();

        let result = patch(
            &view,
            PatchTree::new()
                .item("main", ItemPatch::new().set("nl", "a"))
                .branch(
                    "multi",
                    PatchTree::new().item("level", ItemPatch::new().set("nl", "b")),
                )
                .branch(
                    "added",
                    PatchTree::new().item("leaf", ItemPatch::new().set("nl", "c")),
                ),
        );
        assert!(result.is_ok());

        assert_that!(
            hooks.triggers(),
            eq(vec![
                "main".to_string(),
                "multi.level".to_string(),
                "added.leaf".to_string(),
            ])
        );
    }

    #[googletest::test]
    fn patch_locale_writes_a_single_tag() {
        let tree = sample_tree();
        let view = tree.view();

        let result = patch_locale(
            &view,
            Some("nl"),
            LocalePatch::new()
                .value("main", "Nederlands 2")
                .branch("multi", LocalePatch::new().value("level", "diep")),
        );
        assert!(result.is_ok());

        with_locales(["nl"], || {
            assert_that!(view.get("main").into_value(), some(eq("Nederlands 2")));
            assert_that!(view.get_path("multi.level").into_value(), some(eq("diep")));
        });
        // Other tags are untouched.
        with_locales(["de-DE"], || {
            assert_that!(view.get("main").into_value(), some(eq("Deutsch")));
        });
    }

    #[googletest::test]
    fn patch_locale_defaults_to_the_primary_locale() {
        let tree = sample_tree();
        let view = tree.view();

        with_locales(["de"], || {
            let result = patch_locale(&view, None, LocalePatch::new().value("main", "Deutsch!"));
            assert!(result.is_ok());
        });

        with_locales(["de"], || {
            assert_that!(view.get("main").into_value(), some(eq("Deutsch!")));
        });
    }

    #[googletest::test]
    fn patch_locale_with_no_preference_targets_the_fallback() {
        let tree = sample_tree();
        let view = tree.view();

        with_locales(Vec::<String>::new(), || {
            let result = patch_locale(&view, None, LocalePatch::new().value("main", "plain"));
            assert!(result.is_ok());
        });

        // An unmatched locale now resolves to the rewritten fallback.
        with_locales(["gr"], || {
            assert_that!(view.get("main").into_value(), some(eq("plain")));
        });
    }

    #[googletest::test]
    fn patch_locale_creates_missing_items() {
        let tree = sample_tree();
        let view = tree.view();

        let result = patch_locale(
            &view,
            Some("nl"),
            LocalePatch::new().branch("fresh", LocalePatch::new().value("greeting", "hallo")),
        );
        assert!(result.is_ok());

        with_locales(["nl"], || {
            assert_that!(
                view.get_path("fresh.greeting").into_value(),
                some(eq("hallo"))
            );
        });
        // Only the targeted tag was written, so other locales see nothing.
        with_locales(["it"], || {
            assert!(view.get_path("fresh.greeting").is_unresolved());
        });
    }

    #[googletest::test]
    fn patch_locale_rejects_a_branch_patch_on_an_item() {
        let tree = sample_tree();
        let view = tree.view();

        let result = patch_locale(
            &view,
            Some("nl"),
            LocalePatch::new().branch("main", LocalePatch::new().value("x", "y")),
        );

        match result {
            Err(PatchError::ShapeMismatch { path, node, patch }) => {
                assert_that!(path, eq("main"));
                assert_that!(node, eq("item"));
                assert_that!(patch, eq("branch"));
            }
            Ok(()) => panic!("expected a shape mismatch"),
        }
    }

    #[googletest::test]
    fn patch_locale_rejects_writes_onto_plain_values() {
        let tree = sample_tree();
        let view = tree.view();

        let result = patch_locale(
            &view,
            Some("nl"),
            LocalePatch::new().value("version", "2.0.0"),
        );

        match result {
            Err(PatchError::ShapeMismatch { path, node, patch }) => {
                assert_that!(path, eq("version"));
                assert_that!(node, eq("value"));
                assert_that!(patch, eq("locale value"));
            }
            Ok(()) => panic!("expected a shape mismatch"),
        }
    }

    #[googletest::test]
    fn patching_through_a_subtree_view_prefixes_reported_paths() {
        let hooks = Rc::new(RecordingHooks::default());
        let tree = TranslationTree::with_hooks(
            Branch::from_entries([(
                "multi",
                TreeNode::branch(Branch::from_entries([(
                    "level",
                    TreeNode::item(TranslatableItem::from_entries([("fallback", "deep")])),
                )])),
            )]),
            Rc::<RecordingHooks>::clone(&hooks),
        );

        let sub = tree.view().get("multi").into_tree().unwrap();
        let result = patch(
            &sub,
            PatchTree::new().item("level", ItemPatch::new().set("nl", "diep")),
        );
        assert!(result.is_ok());

        assert_that!(hooks.triggers(), eq(vec!["multi.level".to_string()]));
    }
}
