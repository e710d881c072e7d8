//! 翻訳ツリーの統合テスト
//!
//! 解決・パッチ・ビューを公開 API だけで通して確認します。

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use googletest::prelude::*;
use i18n_tree::{
    Branch,
    ItemPatch,
    LocalePatch,
    PatchError,
    PatchTree,
    ReactiveHooks,
    Resolved,
    TranslatableItem,
    TranslationTree,
    TreeNode,
    loader::tree_from_documents,
    patch,
    patch_locale,
    preferred_locales,
    set_fallback_locales,
    set_host_locales,
    set_locales,
    with_locales,
};
use serde_json::json;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// フックの呼び出しを記録する
#[derive(Debug, Default)]
struct RecordingHooks {
    reads: RefCell<Vec<String>>,
    triggers: RefCell<Vec<String>>,
}

impl ReactiveHooks for RecordingHooks {
    fn track_read(&self, path: &str) {
        self.reads.borrow_mut().push(path.to_owned());
    }

    fn trigger(&self, path: &str) {
        self.triggers.borrow_mut().push(path.to_owned());
    }
}

fn greeting_item() -> TranslatableItem<String> {
    TranslatableItem::from_entries([
        ("nl", "Nederlands".to_string()),
        ("nl-NL", "Nederlands (Nederland)".to_string()),
        ("de-DE", "Deutsch (Deutschland)".to_string()),
        ("de-DE-BY", "Deutsch (Bayern)".to_string()),
        ("fallback", "English".to_string()),
    ])
}

fn greeting_tree() -> TranslationTree<String> {
    TranslationTree::from_entries([("greeting", TreeNode::item(greeting_item()))])
}

#[googletest::test]
fn resolution_walks_the_preference_chain() {
    init_tracing();
    let view = greeting_tree().view();
    let read = |locales: &[&str]| {
        with_locales(locales.to_vec(), || view.get("greeting").into_value().unwrap())
    };

    // Exact tag wins over everything else.
    assert_that!(read(&["de-DE-BY"]), eq("Deutsch (Bayern)"));
    // Unknown region falls back to the language-region prefix.
    assert_that!(read(&["de-DE-NW"]), eq("Deutsch (Deutschland)"));
    // Unknown region of a known language.
    assert_that!(read(&["nl-BE"]), eq("Nederlands"));
    // A later preference entry beats the fallback.
    assert_that!(read(&["gr-GR-Cyrl", "nl"]), eq("Nederlands"));
    // Nothing matches at all.
    assert_that!(read(&["gr"]), eq("English"));
}

#[googletest::test]
fn process_preference_concatenates_configured_host_and_fallback() {
    // The only test in this binary that touches the process-wide lists.
    set_locales(["nl"]);
    set_host_locales(["de", "en-GB"]);
    set_fallback_locales(["en"]);

    assert_that!(
        preferred_locales(),
        eq(vec![
            "nl".to_string(),
            "de".to_string(),
            "en-GB".to_string(),
            "en".to_string(),
        ])
    );

    with_locales(["it"], || {
        assert_that!(preferred_locales(), eq(vec!["it".to_string()]));
    });
    assert_that!(preferred_locales().first(), some(eq(&"nl".to_string())));
}

#[googletest::test]
fn scoped_overrides_nest_and_restore() {
    let view = greeting_tree().view();

    with_locales(["nl"], || {
        assert_that!(view.get("greeting").into_value(), some(eq("Nederlands")));

        with_locales(["de-DE"], || {
            assert_that!(
                view.get("greeting").into_value(),
                some(eq("Deutsch (Deutschland)"))
            );
        });

        // The inner scope is gone; the outer override is live again.
        assert_that!(view.get("greeting").into_value(), some(eq("Nederlands")));
    });
}

#[googletest::test]
fn scoped_overrides_survive_panics() {
    let result = std::panic::catch_unwind(|| {
        with_locales(["de"], || panic!("boom"));
    });
    assert!(result.is_err());

    // A fresh override still works and sees no leftover stack entry.
    let view = greeting_tree().view();
    with_locales(["nl"], || {
        assert_that!(view.get("greeting").into_value(), some(eq("Nederlands")));
    });
}

#[googletest::test]
fn documents_build_a_live_tree() {
    init_tracing();
    let tree = tree_from_documents([
        (
            "en",
            json!({
                "menu": { "open": "Open", "close": "Close" },
                "title": "Demo"
            }),
        ),
        (
            "nl",
            json!({
                "menu": { "open": "Openen" },
                "title": "Demo"
            }),
        ),
        ("fallback", json!({ "menu": { "open": "open", "close": "close" } })),
    ])
    .unwrap();
    let view = tree.view();

    with_locales(["nl"], || {
        assert_that!(view.get_path("menu.open").into_value(), some(eq("Openen")));
        // Not in the Dutch document; the fallback document covers it.
        assert_that!(view.get_path("menu.close").into_value(), some(eq("close")));
    });
    with_locales(["en-US"], || {
        assert_that!(view.get_path("menu.close").into_value(), some(eq("Close")));
    });

    // Late correction of one locale, through the same tree.
    patch_locale(
        &view,
        Some("nl"),
        LocalePatch::new()
            .branch("menu", LocalePatch::new().value("close", "Sluiten".to_string())),
    )
    .unwrap();

    with_locales(["nl"], || {
        assert_that!(view.get_path("menu.close").into_value(), some(eq("Sluiten")));
    });
}

#[googletest::test]
fn patches_preserve_node_identity() {
    let tree = TranslationTree::from_entries([
        ("greeting", TreeNode::item(greeting_item())),
        (
            "menu",
            TreeNode::branch(Branch::from_entries([(
                "open",
                TreeNode::item(TranslatableItem::from_entries([(
                    "fallback",
                    "open".to_string(),
                )])),
            )])),
        ),
    ]);
    let view = tree.view();

    let root_before = view.raw();
    let menu_before = match view.get("menu") {
        Resolved::Tree(sub) => sub.raw(),
        other => panic!("expected a subtree, got {other:?}"),
    };

    patch(
        &view,
        PatchTree::new()
            .item("greeting", ItemPatch::new().set("nl", "Nederlands 2".to_string()))
            .branch(
                "menu",
                PatchTree::new().item(
                    "open",
                    ItemPatch::new().set("nl", "Openen".to_string()),
                ),
            ),
    )
    .unwrap();

    // Both handles still point at the very same nodes.
    assert!(Rc::ptr_eq(&root_before, &view.raw()));
    let menu_after = match view.get("menu") {
        Resolved::Tree(sub) => sub.raw(),
        other => panic!("expected a subtree, got {other:?}"),
    };
    assert!(Rc::ptr_eq(&menu_before, &menu_after));

    with_locales(["nl"], || {
        assert_that!(view.get("greeting").into_value(), some(eq("Nederlands 2")));
        assert_that!(view.get_path("menu.open").into_value(), some(eq("Openen")));
    });
}

#[googletest::test]
fn failed_patches_change_nothing() {
    let tree = TranslationTree::from_entries([
        ("greeting", TreeNode::item(greeting_item())),
        ("title", TreeNode::Value("Demo".to_string())),
    ]);
    let view = tree.view();

    // The greeting write is fine on its own, but the same patch also tries
    // to turn a plain value into a branch.
    let result = patch(
        &view,
        PatchTree::new()
            .item("greeting", ItemPatch::new().set("nl", "vervangen".to_string()))
            .branch("title", PatchTree::new()),
    );

    match result {
        Err(PatchError::ShapeMismatch { path, node, patch }) => {
            assert_that!(path, eq("title"));
            assert_that!(node, eq("value"));
            assert_that!(patch, eq("branch"));
        }
        Ok(()) => panic!("expected a shape mismatch"),
    }

    // The valid part of the rejected patch must not have landed either.
    with_locales(["nl"], || {
        assert_that!(view.get("greeting").into_value(), some(eq("Nederlands")));
    });
}

#[googletest::test]
fn hooks_observe_reads_and_mutations() {
    let hooks = Rc::new(RecordingHooks::default());
    let tree = TranslationTree::with_hooks(
        Branch::from_entries([(
            "menu",
            TreeNode::branch(Branch::from_entries([(
                "open",
                TreeNode::item(TranslatableItem::from_entries([(
                    "fallback",
                    "open".to_string(),
                )])),
            )])),
        )]),
        Rc::<RecordingHooks>::clone(&hooks),
    );
    let view = tree.view();

    with_locales(["nl"], || {
        let _ = view.get_path("menu.open");
    });
    assert_that!(
        *hooks.reads.borrow(),
        eq(vec!["menu".to_string(), "menu.open".to_string()])
    );

    patch_locale(
        &view,
        Some("nl"),
        LocalePatch::new()
            .branch("menu", LocalePatch::new().value("open", "Openen".to_string())),
    )
    .unwrap();
    assert_that!(*hooks.triggers.borrow(), eq(vec!["menu.open".to_string()]));
}

#[googletest::test]
fn missing_keys_render_a_placeholder() {
    init_tracing();
    let view = greeting_tree().view();

    let missing = view.get("missing").get("deeper");
    match missing {
        Resolved::Unknown(placeholder) => {
            assert_that!(placeholder.to_string(), eq("[*.missing.deeper]"));
        }
        other => panic!("expected an unknown path, got {other:?}"),
    }
}

#[googletest::test]
fn empty_overrides_resolve_to_the_fallback_key() {
    let view = greeting_tree().view();

    with_locales(Vec::<String>::new(), || {
        assert_that!(view.get("greeting").into_value(), some(eq("English")));
    });
}
