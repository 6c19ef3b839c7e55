use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use sst_triage_core::config::Config;
use sst_triage_core::triage::{Category, Classification, Outcome, RequestClassifier};
use sst_triage_core::{Result, TriageError};

mod args;
use args::{CategoryAction, Cli, Commands, ConfigAction, LanguageAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Classify { text, json }) => handle_classify(&base_dir, text, json),
        Some(Commands::Category { action }) => handle_category(action, &base_dir),
        Some(Commands::Language { action }) => handle_language(action, &base_dir),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "sst-triage", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("SST_TRIAGE_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".sst-triage"))
        .unwrap_or_else(|| PathBuf::from(".sst-triage"))
}

fn handle_classify(base_dir: &Path, text: Option<String>, json: bool) -> Result<()> {
    let config = Config::load(base_dir)?;
    let classifier = RequestClassifier::new(config.rule_store()?);

    let text = read_input(text)?;
    let result = classifier.classify(&text);

    if json {
        print_classification_json(&result)?;
    } else {
        print_classification(&result);
    }

    Ok(())
}

/// Take text from the argument, falling back to stdin
fn read_input(arg: Option<String>) -> Result<String> {
    let text = match arg {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if text.trim().is_empty() {
        return Err(TriageError::InputMissing);
    }

    Ok(text)
}

fn print_classification(result: &Classification) {
    match &result.outcome {
        Outcome::Matched(category) => {
            println!(
                "Category: {} ({})",
                category.label().green().bold(),
                category.slug()
            );
        }
        Outcome::Ambiguous(candidates) => {
            println!(
                "{} multiple categories matched - needs human review",
                "[AMBIGUOUS]".yellow().bold()
            );
            for category in candidates {
                println!("  {} ({})", category.label().yellow(), category.slug());
            }
        }
        Outcome::Unclassified => {
            println!("{}", "Unclassified - no trigger phrase matched".dimmed());
        }
    }

    if !result.signals.is_empty() {
        println!();
        println!("{}", "Signals:".cyan().bold());
        for hit in &result.signals {
            println!("  {} \"{}\" [{}]", "+".green(), hit.phrase, hit.category);
        }
    }

    if !result.counter_signals.is_empty() {
        println!();
        println!("{}", "Counter-signals:".cyan().bold());
        for hit in &result.counter_signals {
            println!(
                "  {} \"{}\" [{}] -> {}",
                "-".red(),
                hit.phrase,
                hit.category,
                hit.redirect
            );
        }
    }
}

fn print_classification_json(result: &Classification) -> Result<()> {
    let candidates: Vec<&str> = result.candidates().iter().map(|c| c.slug()).collect();
    let value = serde_json::json!({
        "category": result.category().map(|c| c.slug()),
        "ambiguous": result.is_ambiguous(),
        "candidates": candidates,
        "signals": result.signals,
        "counter_signals": result.counter_signals,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn handle_category(action: CategoryAction, base_dir: &Path) -> Result<()> {
    let config = Config::load(base_dir)?;
    let store = config.rule_store()?;

    match action {
        CategoryAction::List => {
            println!();
            for rule in store.all() {
                println!(
                    "  {} {}",
                    rule.category.slug().cyan().bold(),
                    format!("({})", rule.category.label()).dimmed()
                );
            }
            println!();
        }
        CategoryAction::Show { name } => {
            let category = Category::from_str(&name)?;
            let rule = store.get(category);

            println!("Category: {} ({})", category.label().cyan().bold(), category.slug());
            println!();
            println!("{}", rule.description);
            println!();
            println!("{}", "Signals:".cyan().bold());
            for phrase in &rule.signals {
                println!("  {} \"{}\"", "+".green(), phrase);
            }
            if !rule.counter_signals.is_empty() {
                println!();
                println!("{}", "Counter-signals:".cyan().bold());
                for counter in &rule.counter_signals {
                    println!(
                        "  {} \"{}\" -> {}",
                        "-".red(),
                        counter.phrase,
                        counter.redirect
                    );
                }
            }
        }
    }

    Ok(())
}

fn handle_language(action: LanguageAction, base_dir: &Path) -> Result<()> {
    let config = Config::load(base_dir)?;
    let table = config.language_table();

    match action {
        LanguageAction::Lookup { name } => {
            println!("{}", table.code_for(&name)?);
        }
        LanguageAction::Code { code } => {
            println!("{}", table.name_for(&code)?);
        }
        LanguageAction::List => {
            println!();
            for (name, code) in table.entries() {
                println!("  {:<14} {}", name.cyan(), code);
            }
            println!();
        }
    }

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            if config.rules.rules.is_empty() {
                println!("{}", "rules: (builtin only)".dimmed());
            } else {
                for (name, entry) in &config.rules.rules {
                    let mode = if entry.replace { "replace" } else { "append" };
                    println!(
                        "{} = {} signals, {} counter-signals ({})",
                        format!("rules.{}", name).cyan(),
                        entry.signals.len(),
                        entry.counter_signals.len(),
                        mode
                    );
                }
            }
            if config.languages.entries.is_empty() {
                println!("{}", "languages: (builtin only)".dimmed());
            } else {
                for (name, code) in &config.languages.entries {
                    println!("{} = {}", format!("languages.{}", name).cyan(), code);
                }
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
