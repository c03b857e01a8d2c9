//! Ordered Latin -> rune substitution rules.
//!
//! The table is loaded from embedded TOML (five substitution phases plus a
//! rune -> Latin reverse map) and exposed as a lazy global, following the
//! same OnceLock pattern as the settings module.

mod config;
mod table;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use config::RulesConfigError;
pub use table::DEFAULT_TOML;

/// The visible word-separator mark substituted for spaces when enabled.
pub const SEPARATOR: char = '᛫';

/// The converted form of an ampersand.
pub const AMPERSAND_RUNE: char = '⁊';

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub replacement: String,
}

pub struct RuleTable {
    compound_vowels: Vec<Rule>,
    compound_consonants: Vec<Rule>,
    final_vowels: Vec<Rule>,
    letters: Vec<Rule>,
    symbols: Vec<Rule>,
    punctuation: Vec<char>,
    reverse: HashMap<char, Vec<String>>,
}

impl RuleTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RulesConfigError> {
        // Validate eagerly
        config::parse_rules_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RulesConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static RuleTable {
        static INSTANCE: OnceLock<RuleTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let config = config::parse_rules_toml(toml_str).expect("rules TOML must be valid");
            RuleTable::from_config(config)
        })
    }

    fn from_config(config: config::RulesConfig) -> RuleTable {
        let phase = |pairs: Vec<(String, String)>| {
            pairs
                .into_iter()
                .map(|(pattern, replacement)| Rule {
                    pattern,
                    replacement,
                })
                .collect()
        };
        let punctuation = config
            .punctuation
            .iter()
            .filter_map(|p| p.chars().next())
            .collect();
        let reverse = config
            .reverse
            .into_iter()
            .filter_map(|(key, options)| key.chars().next().map(|c| (c, options)))
            .collect();
        RuleTable {
            compound_vowels: phase(config.compound_vowels),
            compound_consonants: phase(config.compound_consonants),
            final_vowels: phase(config.final_vowels),
            letters: phase(config.letters),
            symbols: phase(config.symbols),
            punctuation,
            reverse,
        }
    }

    pub(crate) fn compound_vowels(&self) -> &[Rule] {
        &self.compound_vowels
    }

    pub(crate) fn compound_consonants(&self) -> &[Rule] {
        &self.compound_consonants
    }

    pub(crate) fn final_vowels(&self) -> &[Rule] {
        &self.final_vowels
    }

    pub(crate) fn letters(&self) -> &[Rule] {
        &self.letters
    }

    pub(crate) fn symbols(&self) -> &[Rule] {
        &self.symbols
    }

    pub(crate) fn punctuation(&self) -> &[char] {
        &self.punctuation
    }

    /// All phases in application order, for diagnostics.
    pub fn phases(&self) -> [(&'static str, &[Rule]); 5] {
        [
            ("compound_vowels", self.compound_vowels.as_slice()),
            ("compound_consonants", self.compound_consonants.as_slice()),
            ("final_vowels", self.final_vowels.as_slice()),
            ("letters", self.letters.as_slice()),
            ("symbols", self.symbols.as_slice()),
        ]
    }

    /// Candidate Latin suffixes a deletion of `rune` may un-type, most
    /// specific first. `None` for characters the table never produces.
    pub fn latin_options(&self, rune: char) -> Option<&[String]> {
        self.reverse.get(&rune).map(|v| v.as_slice())
    }

    /// Characters that terminate a word: whitespace, the punctuation set,
    /// quotes and parentheses, the separator mark, and the ampersand in
    /// both its raw and converted forms.
    pub fn is_boundary(&self, ch: char) -> bool {
        ch.is_whitespace()
            || self.punctuation.contains(&ch)
            || matches!(ch, '\'' | '"' | '(' | ')' | '-')
            || ch == SEPARATOR
            || ch == '&'
            || ch == AMPERSAND_RUNE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_table_loads() {
        let table = RuleTable::global();
        assert!(!table.letters().is_empty());
        assert!(!table.punctuation().is_empty());
    }

    #[test]
    fn reverse_lookup_th() {
        let table = RuleTable::global();
        let options = table.latin_options('ᚦ').unwrap();
        assert_eq!(options, ["h"]);
    }

    #[test]
    fn reverse_lookup_unknown() {
        let table = RuleTable::global();
        assert!(table.latin_options('Q').is_none());
        assert!(table.latin_options('漢').is_none());
    }

    #[test]
    fn reverse_options_ordered_most_specific_first() {
        let table = RuleTable::global();
        let options = table.latin_options('ᚫ').unwrap();
        assert_eq!(options.first().map(String::as_str), Some("e"));
    }

    #[test]
    fn boundary_classification() {
        let table = RuleTable::global();
        assert!(table.is_boundary(' '));
        assert!(table.is_boundary('\n'));
        assert!(table.is_boundary('.'));
        assert!(table.is_boundary(SEPARATOR));
        assert!(table.is_boundary('&'));
        assert!(table.is_boundary(AMPERSAND_RUNE));
        assert!(!table.is_boundary('a'));
        assert!(!table.is_boundary('ᚦ'));
    }
}
