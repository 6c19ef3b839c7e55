//! Request Classifier
//!
//! 受信リクエストのフリーテキストをRuleStoreの定義に基づいて分類する。
//!
//! カテゴリはポリシー上相互排他だが、入力によっては複数候補が残る。
//! その場合は`Ambiguous`として全候補を返し、勝手に一つへ絞らない。

use serde::Serialize;

use super::builtin::Category;
use super::store::RuleStore;

/// 分類の判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 候補が一つだけ残った
    Matched(Category),
    /// 複数候補が残った（人間のレビューに回す）
    Ambiguous(Vec<Category>),
    /// ポジティブシグナルが一つも当たらなかった（正常な結果でありエラーではない）
    Unclassified,
}

/// ポジティブシグナルのヒット
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalHit {
    /// シグナルが属するカテゴリ
    pub category: Category,
    /// 本文に現れたフレーズ
    pub phrase: String,
}

/// カウンターシグナルのヒット
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterHit {
    /// 破棄されたカテゴリ
    pub category: Category,
    /// 本文に現れたフレーズ
    pub phrase: String,
    /// 代わりに候補へ載せたカテゴリ
    pub redirect: Category,
}

/// 分類結果
#[derive(Debug, Clone)]
pub struct Classification {
    /// 判定結果
    pub outcome: Outcome,
    /// 見つかったポジティブシグナル
    pub signals: Vec<SignalHit>,
    /// 候補を破棄したカウンターシグナル
    pub counter_signals: Vec<CounterHit>,
}

impl Classification {
    /// 一意に決まったカテゴリを取得
    pub fn category(&self) -> Option<Category> {
        match &self.outcome {
            Outcome::Matched(cat) => Some(*cat),
            _ => None,
        }
    }

    /// 複数候補が残ったか
    pub fn is_ambiguous(&self) -> bool {
        matches!(self.outcome, Outcome::Ambiguous(_))
    }

    /// 残った候補（判定順）
    pub fn candidates(&self) -> &[Category] {
        match &self.outcome {
            Outcome::Matched(cat) => std::slice::from_ref(cat),
            Outcome::Ambiguous(cats) => cats,
            Outcome::Unclassified => &[],
        }
    }
}

/// リクエスト分類器
///
/// 構築時にフレーズを正規化済みの形でコンパイルする。
/// 純粋関数のみで副作用・I/Oを持たない。
pub struct RequestClassifier {
    store: RuleStore,
    compiled: Vec<CompiledRule>,
}

struct CompiledRule {
    category: Category,
    signals: Vec<String>,
    counters: Vec<(String, Category)>,
}

impl RequestClassifier {
    /// 新規分類器を作成
    pub fn new(store: RuleStore) -> Self {
        let compiled = store
            .all()
            .map(|rule| CompiledRule {
                category: rule.category,
                signals: rule.signals.iter().map(|s| normalize(s)).collect(),
                counters: rule
                    .counter_signals
                    .iter()
                    .map(|c| (normalize(&c.phrase), c.redirect))
                    .collect(),
            })
            .collect();

        Self { store, compiled }
    }

    /// ビルトインルールのみで分類器を構築
    pub fn builtin() -> Self {
        Self::new(RuleStore::builtin())
    }

    /// 使用中のルールストアを取得
    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// テキストを分類
    ///
    /// 1. 本文を正規化（小文字化・空白圧縮）
    /// 2. カテゴリごとにポジティブシグナルを部分一致で走査
    /// 3. ヒットしたカテゴリに自身のカウンターシグナルも現れていれば候補から
    ///    破棄し、カウンターシグナルの転送先を候補へ載せる
    /// 4. 候補1個なら`Matched`、0個なら`Unclassified`、複数なら`Ambiguous`
    pub fn classify(&self, text: &str) -> Classification {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Classification {
                outcome: Outcome::Unclassified,
                signals: Vec::new(),
                counter_signals: Vec::new(),
            };
        }

        let mut signals = Vec::new();
        let mut counter_signals = Vec::new();
        let mut candidates: Vec<Category> = Vec::new();

        for rule in &self.compiled {
            let hits: Vec<&String> = rule
                .signals
                .iter()
                .filter(|phrase| normalized.contains(phrase.as_str()))
                .collect();
            if hits.is_empty() {
                continue;
            }

            for phrase in hits {
                signals.push(SignalHit {
                    category: rule.category,
                    phrase: phrase.clone(),
                });
            }

            let counters: Vec<&(String, Category)> = rule
                .counters
                .iter()
                .filter(|(phrase, _)| normalized.contains(phrase.as_str()))
                .collect();

            if counters.is_empty() {
                candidates.push(rule.category);
            } else {
                for (phrase, redirect) in counters {
                    counter_signals.push(CounterHit {
                        category: rule.category,
                        phrase: phrase.clone(),
                        redirect: *redirect,
                    });
                    candidates.push(*redirect);
                }
            }
        }

        candidates.sort();
        candidates.dedup();

        let outcome = match candidates.len() {
            0 => Outcome::Unclassified,
            1 => Outcome::Matched(candidates[0]),
            _ => Outcome::Ambiguous(candidates),
        };

        Classification {
            outcome,
            signals,
            counter_signals,
        }
    }
}

/// 本文・フレーズの正規化（小文字化し、連続空白を1個へ）
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Classification {
        RequestClassifier::builtin().classify(text)
    }

    #[test]
    fn test_new_title_is_make_new_package() {
        let result = classify("Vendor delivered a new title. Please make the art.");
        assert_eq!(result.category(), Some(Category::MakeNewPackage));
        assert!(result
            .signals
            .iter()
            .any(|s| s.phrase == "vendor delivered"));
    }

    #[test]
    fn test_missing_episodic_is_add_missing_assets() {
        let result = classify("Episodic imagery missing for episodes 5-7.");
        assert_eq!(result.category(), Some(Category::AddMissingAssets));
    }

    #[test]
    fn test_not_in_atom_is_publish_to_platform() {
        let result = classify("I don't see the images in Atom, launch in 5 days.");
        assert_eq!(result.category(), Some(Category::PublishToPlatform));
    }

    #[test]
    fn test_unlocalized_is_change_existing_assets() {
        let result = classify("Bulgarian unlocalized, please replace with bg-BG assets.");
        assert_eq!(result.category(), Some(Category::ChangeExistingAssets));
    }

    #[test]
    fn test_counter_signal_redirects() {
        // "nothing in PMAM" would naively match MakeNewPackage, but the
        // documented counter-signal "missing on platform" redirects to
        // PublishToPlatform.
        let result =
            classify("There is nothing in PMAM and the art is missing on platform too.");
        assert_ne!(result.category(), Some(Category::MakeNewPackage));
        assert_eq!(result.category(), Some(Category::PublishToPlatform));
        assert!(result
            .counter_signals
            .iter()
            .any(|c| c.category == Category::MakeNewPackage
                && c.redirect == Category::PublishToPlatform));
    }

    #[test]
    fn test_unrelated_text_is_unclassified() {
        let result = classify("What is the weather today?");
        assert_eq!(result.outcome, Outcome::Unclassified);
        assert!(result.signals.is_empty());
    }

    #[test]
    fn test_blank_input_is_unclassified() {
        let result = classify("   \n\t  ");
        assert_eq!(result.outcome, Outcome::Unclassified);
        assert!(result.signals.is_empty());
        assert!(result.counter_signals.is_empty());
    }

    #[test]
    fn test_two_categories_is_ambiguous() {
        let result = classify("Missing episode 3 artwork, and please push to platform.");
        assert!(result.is_ambiguous());
        assert_eq!(
            result.candidates(),
            &[Category::AddMissingAssets, Category::PublishToPlatform]
        );
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let result = classify("VENDOR   DELIVERED a\nNEW\tTITLE");
        assert_eq!(result.category(), Some(Category::MakeNewPackage));
    }

    #[test]
    fn test_config_signal_reaches_classifier() {
        use crate::triage::{RuleConfigEntry, RulesConfig, RuleStore};

        let config = RulesConfig {
            rules: [(
                "publish-to-platform".to_string(),
                RuleConfigEntry {
                    signals: vec!["push the art live".to_string()],
                    ..Default::default()
                },
            )]
            .into_iter()
            .collect(),
        };
        let store = RuleStore::builtin().with_config(&config).unwrap();
        let classifier = RequestClassifier::new(store);

        let result = classifier.classify("Can you push the art live before Friday?");
        assert_eq!(result.category(), Some(Category::PublishToPlatform));
    }
}
