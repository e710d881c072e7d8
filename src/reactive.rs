//! リアクティビティ連携のためのフック定義
//!
//! 依存追跡は外部システムの責務であり、このクレートは注入されたフックを
//! 呼び出すだけで、追跡エンジン自体は実装しません。ビュー経由の読み取りは
//! 毎回 [`ReactiveHooks::track_read`] を通り、パッチエンジンによる変更は
//! [`ReactiveHooks::trigger`] を通ります。

/// Capability interface an external reactive system plugs into.
///
/// Paths are `.`-joined key segments from the tree root (`"a.b.c"`). Reads
/// through a view are genuine on every access — resolved values are never
/// cached — so an implementation sees every dependency exactly as if the raw
/// node had been read directly. Granularity is the whole leaf: the entries
/// inside a translatable item are never reported individually, and item
/// values pass through uninstrumented.
pub trait ReactiveHooks {
    /// Called for every property read performed through a view.
    fn track_read(&self, path: &str) {
        let _ = path;
    }

    /// Called for every leaf mutation applied by the patch engine.
    fn trigger(&self, path: &str) {
        let _ = path;
    }
}

/// Hooks used when no reactive system is attached; does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl ReactiveHooks for NoopHooks {}
