use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::blueprint::{ChoiceField, FunnelBlueprint, StepKind};
use super::domain::{AssessmentResponse, StepId};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PAIN_INTENSITY_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Outcome of the gate for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepValidation {
    pub is_valid: bool,
    pub messages: Vec<String>,
}

impl StepValidation {
    pub fn pass() -> Self {
        Self {
            is_valid: true,
            messages: Vec::new(),
        }
    }

    fn from_messages(messages: Vec<String>) -> Self {
        Self {
            is_valid: messages.is_empty(),
            messages,
        }
    }
}

/// Decide whether the answers stored for `step` allow moving forward.
///
/// Unknown steps pass.
pub fn validate(
    blueprint: &FunnelBlueprint,
    step: &StepId,
    response: &AssessmentResponse,
) -> StepValidation {
    match blueprint.kind_of(step) {
        Some(kind) => validate_kind(kind, response),
        None => StepValidation::pass(),
    }
}

pub fn validate_kind(kind: StepKind, response: &AssessmentResponse) -> StepValidation {
    let mut messages = Vec::new();

    match kind {
        StepKind::PainProfile => {
            if response.has_qualifying_pain_duration.is_none() {
                messages.push("Tell us whether your pain has lasted three months or more.".into());
            }
            if let Some(intensity) = response.pain_intensity {
                if !PAIN_INTENSITY_RANGE.contains(&intensity) {
                    messages.push("Pain intensity must be between 1 and 10.".into());
                }
            }
        }
        StepKind::ConditionSelection => {
            if response.selected_condition_ids.is_empty()
                && response.free_text_other_condition.trim().is_empty()
            {
                messages.push("Select at least one condition or describe your own.".into());
            }
        }
        StepKind::SensationSelection => {
            if response.selected_sensation_ids.is_empty() {
                messages.push("Select at least one sensation.".into());
            }
        }
        StepKind::SingleChoice(ChoiceField::ActivityImpact) => {
            if response.activity_impact.is_none() {
                messages.push("Choose how much the pain affects your activities.".into());
            }
        }
        StepKind::SingleChoice(ChoiceField::Urgency) => {
            if response.urgency_level.is_none() {
                messages.push("Choose how soon you want relief.".into());
            }
        }
        StepKind::BudgetDecision => {
            if response.has_budget.is_none() {
                messages.push("Let us know whether you have a treatment budget.".into());
            }
        }
        StepKind::BudgetRange => {
            if response.has_budget == Some(true) && response.budget_range.is_none() {
                messages.push("Choose a budget range.".into());
            }
        }
        StepKind::Contact => messages.extend(contact_messages(response)),
        StepKind::TreatmentHistory
        | StepKind::Goals
        | StepKind::Results
        | StepKind::WaitingList => {}
    }

    StepValidation::from_messages(messages)
}

fn contact_messages(response: &AssessmentResponse) -> Vec<String> {
    let mut messages = Vec::new();

    let name_chars = response.name.trim().chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars) {
        messages.push(format!(
            "Name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters."
        ));
    }

    if !is_valid_email(&response.email) {
        messages.push("Enter a valid email address.".into());
    }

    if !response.phone.trim().is_empty() && !is_valid_phone(&response.phone) {
        messages.push(format!(
            "Phone number must contain at least {PHONE_MIN_DIGITS} digits."
        ));
    }

    messages
}

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email.trim()))
}

/// Separators (spaces, dashes, dots, parentheses, `+`) are stripped; the rest must be
/// at least ten digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let mut digits = 0usize;
    for ch in phone.trim().chars() {
        match ch {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' | '+' => {}
            _ => return false,
        }
    }
    digits >= PHONE_MIN_DIGITS
}
