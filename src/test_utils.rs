//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]

use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::reactive::ReactiveHooks;

/// プロセス全体のロケール設定を直列化するテスト用ロック
///
/// 設定済みロケールなどのグローバル状態はテスト間で共有されるため、
/// それを書き換えるテストはこのロックを握ってから実行します。
pub(crate) fn global_locales_lock() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 読み取りと変更の通知を記録するフック実装
#[derive(Debug, Default)]
pub(crate) struct RecordingHooks {
    reads: RefCell<Vec<String>>,
    triggers: RefCell<Vec<String>>,
}

impl RecordingHooks {
    /// 記録された読み取りパスのスナップショット
    pub(crate) fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }

    /// 記録された変更通知パスのスナップショット
    pub(crate) fn triggers(&self) -> Vec<String> {
        self.triggers.borrow().clone()
    }
}

impl ReactiveHooks for RecordingHooks {
    fn track_read(&self, path: &str) {
        self.reads.borrow_mut().push(path.to_owned());
    }

    fn trigger(&self, path: &str) {
        self.triggers.borrow_mut().push(path.to_owned());
    }
}
