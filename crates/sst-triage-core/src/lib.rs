pub mod config;
pub mod error;
pub mod language;
pub mod triage;

pub use config::Config;
pub use error::{Result, TriageError};
pub use language::{code_for, name_for, LanguageTable, LanguagesConfig, BUILTIN_LANGUAGES};
pub use triage::{
    BuiltinCounterSignal, BuiltinRule, Category, Classification, CounterHit, CounterSignal,
    CounterSignalEntry, Outcome, RequestClassifier, RuleConfigEntry, RuleStore, RulesConfig,
    SignalHit, TriggerRule, BUILTIN_RULES,
};
