use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct RulesConfig {
    pub(super) punctuation: Vec<String>,
    pub(super) compound_vowels: Vec<(String, String)>,
    pub(super) compound_consonants: Vec<(String, String)>,
    pub(super) final_vowels: Vec<(String, String)>,
    pub(super) letters: Vec<(String, String)>,
    pub(super) symbols: Vec<(String, String)>,
    pub(super) reverse: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RulesConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("phase {0} has no rules")]
    EmptyPhase(&'static str),
    #[error("empty pattern in phase {0}")]
    EmptyPattern(&'static str),
    #[error("empty replacement for pattern {0:?}")]
    EmptyReplacement(String),
    #[error("punctuation entry {0:?} is not a single character")]
    BadPunctuation(String),
    #[error("reverse key {0:?} is not a single character")]
    BadReverseKey(String),
    #[error("reverse entry {0:?} has an empty option")]
    EmptyReverseOption(String),
    #[error("rule table already initialized")]
    AlreadyInitialized,
}

pub(super) fn parse_rules_toml(toml_str: &str) -> Result<RulesConfig, RulesConfigError> {
    let config: RulesConfig =
        toml::from_str(toml_str).map_err(|e| RulesConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &RulesConfig) -> Result<(), RulesConfigError> {
    let phases: [(&'static str, &[(String, String)]); 4] = [
        ("compound_vowels", &config.compound_vowels),
        ("compound_consonants", &config.compound_consonants),
        ("final_vowels", &config.final_vowels),
        ("letters", &config.letters),
    ];
    for (name, rules) in phases {
        if rules.is_empty() {
            return Err(RulesConfigError::EmptyPhase(name));
        }
        check_rules(name, rules)?;
    }
    // symbols may legitimately be empty in a custom table
    check_rules("symbols", &config.symbols)?;

    for p in &config.punctuation {
        if p.chars().count() != 1 {
            return Err(RulesConfigError::BadPunctuation(p.clone()));
        }
    }
    for (key, options) in &config.reverse {
        if key.chars().count() != 1 {
            return Err(RulesConfigError::BadReverseKey(key.clone()));
        }
        if options.iter().any(|o| o.is_empty()) {
            return Err(RulesConfigError::EmptyReverseOption(key.clone()));
        }
    }
    Ok(())
}

fn check_rules(name: &'static str, rules: &[(String, String)]) -> Result<(), RulesConfigError> {
    for (pattern, replacement) in rules {
        if pattern.is_empty() {
            return Err(RulesConfigError::EmptyPattern(name));
        }
        if replacement.is_empty() {
            return Err(RulesConfigError::EmptyReplacement(pattern.clone()));
        }
    }
    Ok(())
}
