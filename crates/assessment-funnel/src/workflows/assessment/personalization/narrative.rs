//! Summary paragraph composition. Clauses run in a fixed order and each may opt out.

use crate::workflows::assessment::catalog::{Condition, Sensation};

pub(crate) const CLOSING_SENTENCE: &str = "Your pain persists because the damage at its root \
has never been addressed, and that is exactly what our approach is designed to treat.";

pub(crate) const FALLBACK_SUMMARY: &str = "We could not match your answers to the conditions \
and sensations we treat. A specialist will review your responses and follow up personally.";

/// Inputs the clauses read from.
pub(crate) struct NarrativeContext<'a> {
    pub conditions: &'a [&'a Condition],
    pub sensations: &'a [&'a Sensation],
    pub duration: Option<&'static str>,
    pub treatment_count: usize,
}

type Clause = fn(&NarrativeContext<'_>) -> Option<String>;

const CLAUSES: [Clause; 5] = [
    condition_clause,
    sensation_clause,
    duration_clause,
    treatment_clause,
    closing_clause,
];

pub(crate) fn compose(context: &NarrativeContext<'_>) -> String {
    CLAUSES
        .iter()
        .filter_map(|clause| clause(context))
        .collect::<Vec<_>>()
        .join(" ")
}

fn condition_clause(context: &NarrativeContext<'_>) -> Option<String> {
    let names: Vec<&str> = context
        .conditions
        .iter()
        .map(|condition| condition.display_name.as_str())
        .collect();
    (!names.is_empty()).then(|| format!("You are living with {}.", join_natural(&names)))
}

fn sensation_clause(context: &NarrativeContext<'_>) -> Option<String> {
    let names: Vec<String> = context
        .sensations
        .iter()
        .map(|sensation| sensation.display_name.to_lowercase())
        .collect();
    (!names.is_empty()).then(|| format!("You describe the pain as {}.", join_natural(&names)))
}

fn duration_clause(context: &NarrativeContext<'_>) -> Option<String> {
    context
        .duration
        .map(|phrase| format!("It has been with you {phrase}."))
}

fn treatment_clause(context: &NarrativeContext<'_>) -> Option<String> {
    let sentence = match context.treatment_count {
        0 => "You have not tried any treatments yet, so nothing has touched the underlying \
damage."
            .to_string(),
        count @ 1..=2 => format!(
            "You have tried {} {}, and each offered only partial relief.",
            count_word(count),
            if count == 1 { "treatment" } else { "treatments" }
        ),
        count => format!(
            "You have already tried {} different treatments without lasting relief.",
            count_word(count)
        ),
    };
    Some(sentence)
}

fn closing_clause(_: &NarrativeContext<'_>) -> Option<String> {
    Some(CLOSING_SENTENCE.to_string())
}

fn count_word(count: usize) -> String {
    const WORDS: [&str; 13] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve",
    ];
    WORDS
        .get(count)
        .map(|word| word.to_string())
        .unwrap_or_else(|| count.to_string())
}

/// Join items as `A`, `A and B`, or `A, B, and C`.
pub fn join_natural<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(|item| item.as_ref()).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_natural_uses_oxford_comma() {
        assert_eq!(join_natural::<&str>(&[]), "");
        assert_eq!(join_natural(&["A"]), "A");
        assert_eq!(join_natural(&["A", "B"]), "A and B");
        assert_eq!(join_natural(&["A", "B", "C"]), "A, B, and C");
        assert_eq!(join_natural(&["A", "B", "C", "D"]), "A, B, C, and D");
    }

    #[test]
    fn treatment_clause_switches_tiers() {
        let context = |treatment_count| NarrativeContext {
            conditions: &[],
            sensations: &[],
            duration: None,
            treatment_count,
        };

        let none = treatment_clause(&context(0)).expect("always present");
        assert!(none.contains("not tried any treatments"));
        let one = treatment_clause(&context(1)).expect("always present");
        assert!(one.contains("one treatment,"));
        let two = treatment_clause(&context(2)).expect("always present");
        assert!(two.contains("two treatments"));
        let many = treatment_clause(&context(5)).expect("always present");
        assert!(many.contains("five different treatments"));
        let lots = treatment_clause(&context(14)).expect("always present");
        assert!(lots.contains("14 different treatments"));
    }

    #[test]
    fn compose_skips_missing_duration() {
        let context = NarrativeContext {
            conditions: &[],
            sensations: &[],
            duration: None,
            treatment_count: 0,
        };

        let summary = compose(&context);
        assert!(!summary.contains("It has been with you"));
        assert!(summary.ends_with(CLOSING_SENTENCE));
    }
}
