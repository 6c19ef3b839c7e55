use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Unknown category: '{name}' - expected one of: make-new-package, add-missing-assets, publish-to-platform, change-existing-assets")]
    UnknownCategory { name: String },

    #[error("Language not found: {name}")]
    LanguageNotFound { name: String },

    #[error("Locale code not found: {code}")]
    LocaleNotFound { code: String },

    #[error("No input provided - pass TEXT as an argument or pipe it on stdin")]
    InputMissing,

    #[error("Config parse error in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Home directory not found")]
    HomeNotFound,
}

pub type Result<T> = std::result::Result<T, TriageError>;

impl TriageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LanguageNotFound { .. } => 2,
            Self::LocaleNotFound { .. } => 3,
            Self::InputMissing => 4,
            Self::UnknownCategory { .. } => 5,
            Self::ConfigParse { .. } => 6,
            _ => 1,
        }
    }
}
