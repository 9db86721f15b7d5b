//! Tests for the message translation layer.

use edulint::{Linter, Problem, config::translations::Translator};
use serde_json::json;

#[test]
fn templates_without_placeholders_translate_verbatim() {
    let translator = Translator::from_value(json!({
        "R6206": "Obě větve by měly vracet hodnotu explicitně"
    }));

    let translated = translator.translate_text(
        "R6206",
        "Both branches should return a value explicitly (one returns implicit None)",
    );
    assert_eq!(
        translated.as_deref(),
        Some("Obě větve by měly vracet hodnotu explicitně")
    );
}

#[test]
fn captured_words_are_carried_into_the_translation() {
    let translator = Translator::from_value(json!({
        "R6201": "Příkaz if lze nahradit '{}'"
    }));

    let translated = translator.translate_text(
        "R6201",
        "The if statement can be replaced with 'return x'",
    );
    assert_eq!(translated.as_deref(), Some("Příkaz if lze nahradit 'return x'"));
}

#[test]
fn captured_words_can_be_translated_by_position() {
    let translator = Translator::from_value(json!({
        "translation-words": {
            "R6201": { "1": { "return x": "vrať x" } }
        },
        "R6201": "Příkaz if lze nahradit '{}'"
    }));

    let translated = translator.translate_text(
        "R6201",
        "The if statement can be replaced with 'return x'",
    );
    assert_eq!(translated.as_deref(), Some("Příkaz if lze nahradit 'vrať x'"));
}

#[test]
fn non_matching_text_falls_back_to_the_bare_translation() {
    let translator = Translator::from_value(json!({
        "R6201": "Příkaz if jde zjednodušit"
    }));

    let translated = translator.translate_text("R6201", "something entirely different");
    assert_eq!(translated.as_deref(), Some("Příkaz if jde zjednodušit"));
}

#[test]
fn codes_without_translation_stay_untouched() {
    let translator = Translator::from_value(json!({
        "R6201": "Příkaz if jde zjednodušit"
    }));

    assert_eq!(translator.translate_text("R6502", "whatever"), None);

    let mut problem = Problem::new(Linter::Edulint, "student.py", 1, 0, "R6502", "whatever");
    translator.translate(&mut problem);
    assert_eq!(problem.text(), "whatever");
}

#[test]
fn malformed_translation_files_degrade_gracefully() {
    let translator = Translator::from_value(json!("not a dictionary"));
    assert!(translator.is_empty());

    let translator = Translator::from_value(json!({
        "translation-words": 5,
        "R6205": 42,
        "R6206": "Obě větve by měly vracet hodnotu explicitně"
    }));
    assert_eq!(translator.translate_text("R6205", "anything"), None);
    assert_eq!(
        translator.translate_text("R6206", "anything").as_deref(),
        Some("Obě větve by měly vracet hodnotu explicitně")
    );
}
