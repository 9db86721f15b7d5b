#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Configuration of one lint run.

use std::collections::HashSet;

use bon::builder;

use crate::linting::checkers::find_message;

/// Translation of message texts into another language.
pub mod translations;

pub use translations::Translator;

/// Settings for one external linter.
#[derive(Debug, Clone)]
pub struct LinterConfig {
    /// Whether to run the linter at all.
    pub run:  bool,
    /// Extra command-line arguments passed through.
    pub args: Vec<String>,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            run:  true,
            args: Vec::new(),
        }
    }
}

/// Configuration of one lint run.
#[derive(Debug, Default)]
pub struct Config {
    /// When set, only these codes/symbols are reported.
    enabled:          Option<HashSet<String>>,
    /// Codes/symbols never reported.
    disabled:         HashSet<String>,
    /// flake8 settings.
    pub flake8:       LinterConfig,
    /// pylint settings.
    pub pylint:       LinterConfig,
    /// Optional message translations.
    pub translations: Option<Translator>,
}

impl Config {
    /// Whether problems with this message code should be reported.
    pub fn is_enabled(&self, code: &str) -> bool {
        let symbol = find_message(code).map(|m| m.symbol);

        let names = |set: &HashSet<String>| {
            set.contains(code) || symbol.is_some_and(|s| set.contains(s))
        };

        if names(&self.disabled) {
            return false;
        }
        match &self.enabled {
            None => true,
            Some(set) => names(set),
        }
    }
}

/// Builder-friendly constructor for [`Config`].
#[builder(finish_fn = build)]
pub fn lint_config(
    /// Restrict reporting to these codes or symbols.
    enable: Option<Vec<String>>,
    /// Never report these codes or symbols.
    disable: Option<Vec<String>>,
    /// Extra arguments for flake8.
    flake8_args: Option<Vec<String>>,
    /// Extra arguments for pylint.
    pylint_args: Option<Vec<String>>,
    /// Skip running flake8.
    no_flake8: Option<bool>,
    /// Skip running pylint.
    no_pylint: Option<bool>,
    /// Message translations to apply.
    translations: Option<Translator>,
) -> Config {
    Config {
        enabled: enable.map(|codes| codes.into_iter().collect()),
        disabled: disable.unwrap_or_default().into_iter().collect(),
        flake8: LinterConfig {
            run:  !no_flake8.unwrap_or(false),
            args: flake8_args.unwrap_or_default(),
        },
        pylint: LinterConfig {
            run:  !no_pylint.unwrap_or(false),
            args: pylint_args.unwrap_or_default(),
        },
        translations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enables_everything() {
        let config = Config::default();
        assert!(config.is_enabled("R6201"));
        assert!(config.is_enabled("E501"));
    }

    #[test]
    fn enable_list_restricts_by_code_or_symbol() {
        let config = lint_config()
            .enable(vec!["simplifiable-if-return".to_string()])
            .build();
        assert!(config.is_enabled("R6201"));
        assert!(!config.is_enabled("R6202"));
        assert!(!config.is_enabled("E501"));
    }

    #[test]
    fn disable_wins_over_enable() {
        let config = lint_config()
            .enable(vec!["R6201".to_string(), "R6202".to_string()])
            .disable(vec!["R6201".to_string()])
            .build();
        assert!(!config.is_enabled("R6201"));
        assert!(config.is_enabled("R6202"));
    }
}
