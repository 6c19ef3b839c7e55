//! Builtin Trigger Rules
//!
//! コード内で定義されるビルトインのトリガールール。
//! 四つの業務カテゴリと、各カテゴリのポジティブシグナル／カウンターシグナルを保持する。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TriageError;

/// 業務カテゴリ（閉じた集合）
///
/// チケット分類の四カテゴリ。判定順はこの宣言順に従う。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// ベンダーから新規タイトルが納品され、PMAMにパッケージが存在しない
    MakeNewPackage,
    /// パッケージは存在するが一部アセットが欠けている
    AddMissingAssets,
    /// PMAMにはあるがAtom/SkyShowTime上に出ていない
    PublishToPlatform,
    /// 既存アセットの差し替え・修正
    ChangeExistingAssets,
}

impl Category {
    /// 全カテゴリ（判定順）
    pub const ALL: [Category; 4] = [
        Category::MakeNewPackage,
        Category::AddMissingAssets,
        Category::PublishToPlatform,
        Category::ChangeExistingAssets,
    ];

    /// kebab-caseスラッグ（CLI・設定ファイルで使用）
    pub fn slug(&self) -> &'static str {
        match self {
            Category::MakeNewPackage => "make-new-package",
            Category::AddMissingAssets => "add-missing-assets",
            Category::PublishToPlatform => "publish-to-platform",
            Category::ChangeExistingAssets => "change-existing-assets",
        }
    }

    /// 元のチケット台帳に合わせた表示名
    pub fn label(&self) -> &'static str {
        match self {
            Category::MakeNewPackage => "Make New Package",
            Category::AddMissingAssets => "Add Missing Image Assets",
            Category::PublishToPlatform => "Publish Artwork to Platform",
            Category::ChangeExistingAssets => "Change Existing Image Assets",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = TriageError;

    /// スラッグまたは表示名からパース（大文字小文字を区別しない）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == needle || c.label().to_lowercase() == needle)
            .ok_or(TriageError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// カウンターシグナルの静的定義
///
/// フレーズが本文に現れた場合、そのカテゴリの候補を破棄し、
/// `redirect`のカテゴリを代わりに候補へ載せる。
#[derive(Debug, Clone)]
pub struct BuiltinCounterSignal {
    pub phrase: &'static str,
    pub redirect: Category,
}

/// ビルトイントリガールールの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinRule {
    /// 対象カテゴリ
    pub category: Category,
    /// カテゴリの説明（`category show`で表示）
    pub description: &'static str,
    /// ポジティブシグナル（正規化済み小文字フレーズ）
    pub signals: &'static [&'static str],
    /// カウンターシグナル
    pub counter_signals: &'static [BuiltinCounterSignal],
}

/// ビルトイントリガールール定義
///
/// フレーズはすべて小文字・空白1個に正規化した形で持つ。
/// カウンターシグナルのフレーズは、転送先カテゴリのポジティブシグナル語彙と
/// 必ず対応させること。
pub const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        category: Category::MakeNewPackage,
        description: "Vendor delivered a brand new title and no package exists in PMAM yet. \
                      Key art, image hero and episodic artwork all need to be created \
                      from scratch.",
        signals: &[
            "new title",
            "vendor delivered",
            "make the art",
            "create a package",
            "new package",
            "nothing in pmam",
            "not in pmam",
        ],
        counter_signals: &[
            BuiltinCounterSignal {
                phrase: "missing on platform",
                redirect: Category::PublishToPlatform,
            },
            BuiltinCounterSignal {
                phrase: "already in pmam",
                redirect: Category::PublishToPlatform,
            },
        ],
    },
    BuiltinRule {
        category: Category::AddMissingAssets,
        description: "A package exists in PMAM but the delivery is incomplete, e.g. episodic \
                      artwork for some episodes or a missing KA/IH variant.",
        signals: &[
            "imagery missing",
            "missing for episodes",
            "missing episode",
            "missing ka",
            "missing ih",
            "assets missing",
            "partial delivery",
            "incomplete package",
        ],
        counter_signals: &[
            BuiltinCounterSignal {
                phrase: "nothing in pmam",
                redirect: Category::MakeNewPackage,
            },
            BuiltinCounterSignal {
                phrase: "missing on platform",
                redirect: Category::PublishToPlatform,
            },
        ],
    },
    BuiltinRule {
        category: Category::PublishToPlatform,
        description: "Assets are complete in PMAM but not visible on SkyShowTime. The package \
                      needs to be pushed through Atom onto the platform.",
        signals: &[
            "in atom",
            "on skyshowtime",
            "missing on platform",
            "push to platform",
            "push the package",
            "publish",
            "go live",
            "launch",
            "not visible",
            "already in pmam",
        ],
        counter_signals: &[BuiltinCounterSignal {
            phrase: "unlocalized",
            redirect: Category::ChangeExistingAssets,
        }],
    },
    BuiltinRule {
        category: Category::ChangeExistingAssets,
        description: "Assets already exist in PMAM or on platform but are wrong and must be \
                      swapped, e.g. unlocalized artwork, a non-compliant title treatment \
                      or outdated key art.",
        signals: &[
            "unlocalized",
            "replace",
            "swap",
            "wrong artwork",
            "wrong title treatment",
            "update the art",
            "incorrect locale",
            "outdated",
        ],
        counter_signals: &[BuiltinCounterSignal {
            phrase: "nothing in pmam",
            redirect: Category::MakeNewPackage,
        }],
    },
];

/// カウンターシグナルのランタイム定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSignal {
    /// 本文に現れた場合に候補を破棄するフレーズ
    pub phrase: String,
    /// 破棄後に候補へ載せるカテゴリ
    pub redirect: Category,
}

/// トリガールールのランタイム定義
///
/// ビルトインまたは`config.toml`の`[rules]`セクションから構築される。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRule {
    /// 対象カテゴリ
    pub category: Category,
    /// カテゴリの説明
    pub description: String,
    /// ポジティブシグナル
    pub signals: Vec<String>,
    /// カウンターシグナル
    pub counter_signals: Vec<CounterSignal>,
}

impl From<&BuiltinRule> for TriggerRule {
    fn from(builtin: &BuiltinRule) -> Self {
        Self {
            category: builtin.category,
            description: builtin.description.to_string(),
            signals: builtin.signals.iter().map(|s| s.to_string()).collect(),
            counter_signals: builtin
                .counter_signals
                .iter()
                .map(|c| CounterSignal {
                    phrase: c.phrase.to_string(),
                    redirect: c.redirect,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_cover_all_categories() {
        assert_eq!(BUILTIN_RULES.len(), Category::ALL.len());
        for cat in Category::ALL {
            assert!(
                BUILTIN_RULES.iter().any(|r| r.category == cat),
                "No builtin rule for {}",
                cat
            );
        }
    }

    #[test]
    fn test_counter_signals_map_to_redirect_vocabulary() {
        // Every counter-signal phrase must appear in the positive signals
        // of the category it redirects to.
        for rule in BUILTIN_RULES {
            for counter in rule.counter_signals {
                let target = BUILTIN_RULES
                    .iter()
                    .find(|r| r.category == counter.redirect)
                    .unwrap();
                assert!(
                    target.signals.contains(&counter.phrase),
                    "Counter '{}' on {} does not map to a {} signal",
                    counter.phrase,
                    rule.category,
                    counter.redirect
                );
            }
        }
    }

    #[test]
    fn test_category_parse_slug_and_label() {
        assert_eq!(
            "make-new-package".parse::<Category>().unwrap(),
            Category::MakeNewPackage
        );
        assert_eq!(
            "Publish Artwork to Platform".parse::<Category>().unwrap(),
            Category::PublishToPlatform
        );
        assert!("kitchen-sink".parse::<Category>().is_err());
    }

    #[test]
    fn test_trigger_rule_from_builtin() {
        let builtin = &BUILTIN_RULES[0];
        let rule = TriggerRule::from(builtin);
        assert_eq!(rule.category, builtin.category);
        assert_eq!(rule.signals.len(), builtin.signals.len());
        assert_eq!(rule.counter_signals.len(), builtin.counter_signals.len());
    }
}
