#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Natural-language translation of message texts.
//!
//! A translation file maps message codes to replacement templates. When the
//! built-in template of a code contains placeholders, the original message
//! is matched against a derived pattern so the variable parts can be carried
//! over (and optionally translated word-by-word) into the replacement.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::linting::{checkers::all_messages, problem::Problem};

/// Key of the per-word translation table inside a translation file.
const TRANSLATION_WORDS_LABEL: &str = "translation-words";

/// Replacement template for one message code.
#[derive(Debug, Clone)]
pub struct Translation {
    /// The replacement text, with `{}` slots for carried-over words.
    translation: String,
    /// Per-capture-position word replacements (1-based positions).
    words:       HashMap<usize, HashMap<String, String>>,
}

impl Translation {
    /// Creates a translation with no word table.
    pub fn new(translation: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
            words:       HashMap::new(),
        }
    }

    /// Translates captured words by their 1-based position.
    fn translate_words(&self, captured: &[String]) -> Vec<String> {
        captured
            .iter()
            .enumerate()
            .map(|(i, word)| {
                self.words
                    .get(&(i + 1))
                    .and_then(|mapping| mapping.get(word))
                    .cloned()
                    .unwrap_or_else(|| word.clone())
            })
            .collect()
    }
}

/// Fills the `{}` slots of a template with words, in order.
fn format_slots(template: &str, words: &[String]) -> String {
    let mut result = String::new();
    let mut rest = template;
    let mut word_iter = words.iter();
    while let Some(pos) = rest.find("{}") {
        result.push_str(&rest[..pos]);
        if let Some(word) = word_iter.next() {
            result.push_str(word);
        }
        rest = &rest[pos + 2..];
    }
    result.push_str(rest);
    result
}

/// Compiles a message template into a case-insensitive pattern with one
/// capture per `{}` placeholder.
fn to_pattern(template: &str) -> Option<Regex> {
    let escaped = regex::escape(template);
    let slot = regex::escape("{}");
    let pattern = format!("(?i)^{}$", escaped.replace(&slot, "(.*)"));
    Regex::new(&pattern).ok()
}

/// Translates problem texts according to a loaded translation file.
#[derive(Debug, Default)]
pub struct Translator {
    /// Replacement templates by message code.
    translations: HashMap<String, Translation>,
    /// Patterns derived from the built-in message templates.
    patterns:     HashMap<String, Regex>,
}

impl Translator {
    /// Loads a translation file (JSON) from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read translation file {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Translation file {} is not valid JSON", path.display()))?;
        Ok(Self::from_value(value))
    }

    /// Builds a translator from parsed JSON, warning about (and skipping)
    /// malformed sections instead of failing.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(entries) = value else {
            warn!(
                "language translations are not a dictionary but a value of type {}",
                value_type(&value)
            );
            return Self::default();
        };

        let words = parse_translation_words(entries.get(TRANSLATION_WORDS_LABEL));

        let mut translations = HashMap::new();
        for (id, translation) in &entries {
            if id == TRANSLATION_WORDS_LABEL {
                continue;
            }
            let Value::String(text) = translation else {
                warn!(
                    "translation for identifier {id} is not a string but a value of type {}",
                    value_type(translation)
                );
                continue;
            };
            translations.insert(
                id.clone(),
                Translation {
                    translation: text.clone(),
                    words:       words.get(id).cloned().unwrap_or_default(),
                },
            );
        }

        let mut patterns = HashMap::new();
        for spec in all_messages() {
            if spec.template.contains("{}")
                && let Some(regex) = to_pattern(spec.template)
            {
                patterns.insert(spec.code.to_string(), regex);
            }
        }

        Self {
            translations,
            patterns,
        }
    }

    /// Whether any translations are loaded.
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Returns the translated text for a message, or `None` when the code
    /// has no translation.
    pub fn translate_text(&self, code: &str, text: &str) -> Option<String> {
        let translation = self.translations.get(code)?;
        let Some(pattern) = self.patterns.get(code) else {
            return Some(translation.translation.clone());
        };

        match pattern.captures(text) {
            Some(captures) => {
                let captured: Vec<String> = captures
                    .iter()
                    .skip(1)
                    .map(|c| c.map(|m| m.as_str().to_string()).unwrap_or_default())
                    .collect();
                let words = translation.translate_words(&captured);
                Some(format_slots(&translation.translation, &words))
            }
            None => Some(translation.translation.clone()),
        }
    }

    /// Translates a problem in place when a translation exists.
    pub fn translate(&self, problem: &mut Problem) {
        if let Some(text) = self.translate_text(problem.code(), problem.text()) {
            problem.set_text(text);
        }
    }
}

/// Short type name of a JSON value, for warnings.
fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses the `translation-words` table, warning about malformed entries.
fn parse_translation_words(
    raw: Option<&Value>,
) -> HashMap<String, HashMap<usize, HashMap<String, String>>> {
    let mut result = HashMap::new();
    let Some(raw) = raw else { return result };
    let Value::Object(by_id) = raw else {
        warn!(
            "translation for specific words is not a dictionary but a value of type {}",
            value_type(raw)
        );
        return result;
    };

    for (id, by_order) in by_id {
        let Value::Object(by_order) = by_order else {
            warn!(
                "translation words for identifier {id} is not a dictionary but a value of type {}",
                value_type(by_order)
            );
            continue;
        };

        let mut orders = HashMap::new();
        for (order, mapping) in by_order {
            let Ok(position) = order.parse::<usize>() else {
                warn!(
                    "order value {order} of translation words for identifier {id} does not \
                     contain integer"
                );
                continue;
            };
            let Value::Object(mapping) = mapping else {
                warn!(
                    "translation words mapping for order {order} of identifier {id} is not a \
                     dictionary but a value of type {}",
                    value_type(mapping)
                );
                continue;
            };

            let mut word_map = HashMap::new();
            for (word, translated) in mapping {
                let Value::String(translated) = translated else {
                    warn!(
                        "translation for words {word} for order {order} of identifier {id} is \
                         not a string but a value of type {}",
                        value_type(translated)
                    );
                    continue;
                };
                word_map.insert(word.clone(), translated.clone());
            }
            orders.insert(position, word_map);
        }
        result.insert(id.clone(), orders);
    }
    result
}
