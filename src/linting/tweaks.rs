#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Per-message adjustments applied to collected problems.
//!
//! Some messages the wrapped linters emit are noise for a novice, and some
//! are phrased for professionals. A tweak is keyed by `(linter, code)` and
//! can drop a problem or replace its text with plain language.

use std::collections::HashMap;

use super::problem::{Linter, Problem};

/// A post-processing rule for one message of one linter.
pub struct Tweak {
    /// Which linter's message this tweak applies to.
    linter: Linter,
    /// Message code the tweak applies to.
    code:   &'static str,
    /// Decides whether the problem is shown at all.
    keep:   fn(&Problem) -> bool,
    /// Optional replacement text for kept problems.
    reword: Option<fn(&Problem) -> String>,
}

impl Tweak {
    /// A tweak that keeps the problem and rewords it.
    fn reword(linter: Linter, code: &'static str, reword: fn(&Problem) -> String) -> Self {
        Self {
            linter,
            code,
            keep: |_| true,
            reword: Some(reword),
        }
    }

    /// A tweak that only decides whether to keep the problem.
    fn filter(linter: Linter, code: &'static str, keep: fn(&Problem) -> bool) -> Self {
        Self {
            linter,
            code,
            keep,
            reword: None,
        }
    }
}

/// The quoted name inside a message like `Variable name "x" doesn't …`.
fn quoted_name(text: &str) -> Option<&str> {
    let start = text.find('"')? + 1;
    let end = start + text[start..].find('"')?;
    Some(&text[start..end])
}

/// Built-in tweaks for common beginner-noise messages.
pub fn builtin_tweaks() -> Vec<Tweak> {
    vec![
        // short names like i, j, n are fine in novice code
        Tweak::filter(Linter::Pylint, "C0103", |p| {
            quoted_name(p.text()).is_none_or(|name| name.chars().count() > 1)
        }),
        Tweak::reword(Linter::Pylint, "C0114", |_| {
            "Add a short comment at the top of the file describing what it does.".to_string()
        }),
        Tweak::reword(Linter::Flake8, "E501", |_| {
            "This line is too long. Split it into multiple lines.".to_string()
        }),
        Tweak::reword(Linter::Flake8, "W291", |_| {
            "There are spaces at the end of this line. Remove them.".to_string()
        }),
    ]
}

/// Applies tweaks to a list of problems; problems without a tweak pass
/// through unchanged.
pub fn apply_tweaks(problems: Vec<Problem>, tweaks: &[Tweak]) -> Vec<Problem> {
    let by_key: HashMap<(Linter, &str), &Tweak> = tweaks
        .iter()
        .map(|t| ((t.linter, t.code), t))
        .collect();

    let mut result = Vec::with_capacity(problems.len());
    for mut problem in problems {
        match by_key.get(&(problem.source(), problem.code())) {
            Some(tweak) => {
                if (tweak.keep)(&problem) {
                    if let Some(reword) = tweak.reword {
                        let text = reword(&problem);
                        problem.set_text(text);
                    }
                    result.push(problem);
                }
            }
            None => result.push(problem),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_complaints_are_dropped() {
        let problems = vec![
            Problem::new(
                Linter::Pylint,
                "student.py",
                1,
                0,
                "C0103",
                "Variable name \"x\" doesn't conform to snake_case naming style",
            ),
            Problem::new(
                Linter::Pylint,
                "student.py",
                2,
                0,
                "C0103",
                "Variable name \"myVariable\" doesn't conform to snake_case naming style",
            ),
        ];
        let kept = apply_tweaks(problems, &builtin_tweaks());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].line(), 2);
    }

    #[test]
    fn line_too_long_is_reworded() {
        let problems = vec![Problem::new(
            Linter::Flake8,
            "student.py",
            5,
            80,
            "E501",
            "line too long (88 > 79 characters)",
        )];
        let kept = apply_tweaks(problems, &builtin_tweaks());
        assert_eq!(
            kept[0].text(),
            "This line is too long. Split it into multiple lines."
        );
    }

    #[test]
    fn untweaked_problems_pass_through() {
        let problems = vec![Problem::new(
            Linter::Edulint,
            "student.py",
            1,
            0,
            "R6201",
            "The if statement can be replaced with 'return x'",
        )];
        let kept = apply_tweaks(problems, &builtin_tweaks());
        assert_eq!(kept.len(), 1);
        assert_eq!(
            kept[0].text(),
            "The if statement can be replaced with 'return x'"
        );
    }
}
