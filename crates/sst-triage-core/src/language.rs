//! Language Code Lookup
//!
//! 言語名とロケールコードの静的対応表。
//! SkyShowTimeの展開市場20言語を保持し、ローカライズ済みアセットのタグ付けに使う。
//!
//! ## 使用例
//!
//! ```rust
//! use sst_triage_core::language;
//!
//! assert_eq!(language::code_for("Croatian").unwrap(), "hr-HR");
//! assert_eq!(language::name_for("hr-HR").unwrap(), "Croatian");
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};

/// ビルトイン言語表（言語名, ロケールコード）
///
/// 名前はアルファベット順。コードは一意で、逆引きが常に対称になる。
pub const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("Albanian", "sq-AL"),
    ("Bosnian", "bs-BA"),
    ("Bulgarian", "bg-BG"),
    ("Croatian", "hr-HR"),
    ("Czech", "cs-CZ"),
    ("Danish", "da-DK"),
    ("Dutch", "nl-NL"),
    ("English", "en-GB"),
    ("Finnish", "fi-FI"),
    ("Hungarian", "hu-HU"),
    ("Macedonian", "mk-MK"),
    ("Norwegian", "nb-NO"),
    ("Polish", "pl-PL"),
    ("Portuguese", "pt-PT"),
    ("Romanian", "ro-RO"),
    ("Serbian", "sr-RS"),
    ("Slovak", "sk-SK"),
    ("Slovenian", "sl-SI"),
    ("Spanish", "es-ES"),
    ("Swedish", "sv-SE"),
];

static NAME_INDEX: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    BUILTIN_LANGUAGES
        .iter()
        .map(|(name, code)| (name.to_lowercase(), *code))
        .collect()
});

static CODE_INDEX: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    BUILTIN_LANGUAGES
        .iter()
        .map(|(name, code)| (code.to_lowercase(), *name))
        .collect()
});

/// ビルトイン表から言語名でロケールコードを引く（大文字小文字を区別しない）
pub fn code_for(name: &str) -> Result<&'static str> {
    NAME_INDEX
        .get(&name.trim().to_lowercase())
        .copied()
        .ok_or_else(|| TriageError::LanguageNotFound {
            name: name.to_string(),
        })
}

/// ビルトイン表からロケールコードで言語名を逆引きする
pub fn name_for(code: &str) -> Result<&'static str> {
    CODE_INDEX
        .get(&code.trim().to_lowercase())
        .copied()
        .ok_or_else(|| TriageError::LocaleNotFound {
            code: code.to_string(),
        })
}

/// ランタイム言語表
///
/// ビルトインと`config.toml`の`[languages]`セクションをマージして保持。
#[derive(Debug, Clone)]
pub struct LanguageTable {
    /// 表示名（挿入キー） -> コード
    entries: Vec<(String, String)>,
}

impl LanguageTable {
    /// ビルトイン表のみで初期化
    pub fn builtin() -> Self {
        let entries = BUILTIN_LANGUAGES
            .iter()
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect();
        Self { entries }
    }

    /// `[languages]`設定でオーバーライド
    ///
    /// - 同名言語はコードを上書き
    /// - 新規言語は追加
    pub fn with_config(mut self, config: &LanguagesConfig) -> Self {
        for (name, code) in &config.entries {
            match self
                .entries
                .iter_mut()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
            {
                Some((_, existing)) => *existing = code.clone(),
                None => self.entries.push((name.clone(), code.clone())),
            }
        }
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    /// 言語名でロケールコードを引く（大文字小文字を区別しない）
    pub fn code_for(&self, name: &str) -> Result<&str> {
        let needle = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| n.to_lowercase() == needle)
            .map(|(_, code)| code.as_str())
            .ok_or_else(|| TriageError::LanguageNotFound {
                name: name.to_string(),
            })
    }

    /// ロケールコードで言語名を逆引きする
    pub fn name_for(&self, code: &str) -> Result<&str> {
        let needle = code.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(_, c)| c.to_lowercase() == needle)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| TriageError::LocaleNotFound {
                code: code.to_string(),
            })
    }

    /// 全エントリ（言語名アルファベット順）
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `config.toml`のlanguagesセクション
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguagesConfig {
    #[serde(flatten)]
    pub entries: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_has_twenty_entries() {
        assert_eq!(BUILTIN_LANGUAGES.len(), 20);
    }

    #[test]
    fn test_round_trip_all_entries() {
        for (name, code) in BUILTIN_LANGUAGES {
            assert_eq!(code_for(name).unwrap(), *code);
            assert_eq!(name_for(code).unwrap(), *name);
        }
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(code_for("croatian").unwrap(), "hr-HR");
        assert_eq!(code_for("  CROATIAN ").unwrap(), "hr-HR");
        assert_eq!(name_for("HR-hr").unwrap(), "Croatian");
    }

    #[test]
    fn test_unknown_language_is_not_found() {
        assert!(matches!(
            code_for("Klingon"),
            Err(TriageError::LanguageNotFound { .. })
        ));
        assert!(matches!(
            name_for("tlh-QO"),
            Err(TriageError::LocaleNotFound { .. })
        ));
    }

    #[test]
    fn test_table_round_trip_all_entries() {
        let table = LanguageTable::builtin();
        assert_eq!(table.len(), 20);
        for (name, code) in BUILTIN_LANGUAGES {
            assert_eq!(table.code_for(name).unwrap(), *code);
            assert_eq!(table.name_for(code).unwrap(), *name);
        }
    }

    #[test]
    fn test_table_config_add_and_override() {
        let config = LanguagesConfig {
            entries: [
                ("Basque".to_string(), "eu-ES".to_string()),
                ("English".to_string(), "en-US".to_string()),
            ]
            .into_iter()
            .collect(),
        };

        let table = LanguageTable::builtin().with_config(&config);
        assert_eq!(table.len(), 21);
        assert_eq!(table.code_for("Basque").unwrap(), "eu-ES");
        assert_eq!(table.code_for("English").unwrap(), "en-US");
    }
}
