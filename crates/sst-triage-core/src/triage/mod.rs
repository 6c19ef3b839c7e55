//! # Triage Module
//!
//! SSTイメージ運用チームに届くリクエスト本文を四つの業務カテゴリへ分類する。
//!
//! ## カテゴリ
//!
//! - **Make New Package**: 新規タイトル納品、PMAMにパッケージなし
//! - **Add Missing Image Assets**: パッケージはあるが納品が不完全
//! - **Publish Artwork to Platform**: PMAMにはあるがSkyShowTime上に出ていない
//! - **Change Existing Image Assets**: 既存アセットの差し替え・修正
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトイントリガールール定義
//! - `store`: ルール定義のランタイムストア
//! - `classifier`: 分類器
//!
//! ## 使用例
//!
//! ```rust
//! use sst_triage_core::triage::{Category, RequestClassifier};
//!
//! let classifier = RequestClassifier::builtin();
//!
//! let result = classifier.classify("Vendor delivered a new title. Please make the art.");
//! assert_eq!(result.category(), Some(Category::MakeNewPackage));
//!
//! // シグナルが当たらなければUnclassified（エラーではない）
//! let result = classifier.classify("What is the weather today?");
//! assert_eq!(result.category(), None);
//! ```

mod builtin;
mod classifier;
mod store;

// Re-exports
pub use builtin::{
    BuiltinCounterSignal, BuiltinRule, Category, CounterSignal, TriggerRule, BUILTIN_RULES,
};
pub use classifier::{Classification, CounterHit, Outcome, RequestClassifier, SignalHit};
pub use store::{CounterSignalEntry, RuleConfigEntry, RuleStore, RulesConfig};
