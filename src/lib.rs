//! i18n-tree
//!
//! 実行時 i18n のためのロケールフォールバック解決とライブ翻訳ツリー

pub mod format;
pub mod item;
pub mod loader;
pub mod locales;
pub mod message;
pub mod patch;
pub mod reactive;
pub mod resolve;
pub mod settings;
pub mod tree;
pub mod view;

mod test_utils;

// よく使う型と操作を再エクスポート
pub use item::{
    FALLBACK_KEY,
    ItemPatch,
    TranslatableItem,
};
pub use locales::{
    preferred_locales,
    primary_locale,
    set_fallback_locales,
    set_host_locales,
    set_locales,
    with_locales,
};
pub use patch::{
    LocalePatch,
    PatchError,
    PatchTree,
    patch,
    patch_locale,
};
pub use reactive::{
    NoopHooks,
    ReactiveHooks,
};
pub use tree::{
    Branch,
    BranchRef,
    ItemRef,
    TranslationTree,
    TreeNode,
};
pub use view::{
    Resolved,
    TreeView,
    UnknownPath,
};
