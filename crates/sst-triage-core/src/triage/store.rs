//! Rule Store
//!
//! トリガールールのランタイムストア。
//! ビルトインと`config.toml`の`[rules]`セクションをマージして保持。
//! カテゴリ集合は閉じているため、設定は既存カテゴリの拡張・置換のみ可能。

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::builtin::{Category, CounterSignal, TriggerRule, BUILTIN_RULES};

/// トリガールールのランタイムストア
#[derive(Debug, Clone)]
pub struct RuleStore {
    rules: BTreeMap<Category, TriggerRule>,
}

impl RuleStore {
    /// ビルトインルールのみで初期化
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|b| (b.category, TriggerRule::from(b)))
            .collect();
        Self { rules }
    }

    /// `[rules]`設定でオーバーライド
    ///
    /// - `replace = false`（デフォルト）: シグナルを追記
    /// - `replace = true`: ビルトインのリストを置き換え
    /// - 未知のカテゴリ名・転送先は`UnknownCategory`エラー
    pub fn with_config(mut self, config: &RulesConfig) -> Result<Self> {
        for (name, entry) in &config.rules {
            let category: Category = name.parse()?;
            let counter_signals = entry
                .counter_signals
                .iter()
                .map(|c| {
                    Ok(CounterSignal {
                        phrase: c.phrase.clone(),
                        redirect: c.redirect.parse()?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            // closed set, builtin always present
            let rule = self.rules.get_mut(&category).expect("builtin rule");

            if let Some(description) = &entry.description {
                rule.description = description.clone();
            }
            if entry.replace {
                rule.signals = entry.signals.clone();
                rule.counter_signals = counter_signals;
            } else {
                rule.signals.extend(entry.signals.iter().cloned());
                rule.counter_signals.extend(counter_signals);
            }
        }
        Ok(self)
    }

    /// カテゴリのルール定義を取得
    pub fn get(&self, category: Category) -> &TriggerRule {
        &self.rules[&category]
    }

    /// 全ルールを取得（カテゴリ判定順）
    pub fn all(&self) -> impl Iterator<Item = &TriggerRule> {
        self.rules.values()
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `config.toml`のrulesセクション
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(flatten)]
    pub rules: HashMap<String, RuleConfigEntry>,
}

/// 個別ルールの設定エントリ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfigEntry {
    /// カテゴリ説明の上書き（オプション）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 追加（または置換）するポジティブシグナル
    #[serde(default)]
    pub signals: Vec<String>,
    /// 追加（または置換）するカウンターシグナル
    #[serde(default)]
    pub counter_signals: Vec<CounterSignalEntry>,
    /// trueならビルトインのリストを置き換える
    #[serde(default)]
    pub replace: bool,
}

/// 設定ファイル上のカウンターシグナル表現（カテゴリはスラッグ文字列）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterSignalEntry {
    pub phrase: String,
    pub redirect: String,
}
