use super::common::*;

use crate::workflows::assessment::validation::{validate_kind, NAME_MAX_CHARS};
use crate::workflows::assessment::{validate, BudgetRange, ChoiceField, StepKind, UrgencyLevel};

#[test]
fn condition_step_accepts_ids_or_free_text() {
    let blueprint = blueprint();
    let mut response = response_at("conditions");

    let empty = validate(&blueprint, &step("conditions"), &response);
    assert!(!empty.is_valid);
    assert_eq!(empty.messages.len(), 1);

    response.selected_condition_ids.insert("x".to_string());
    assert!(validate(&blueprint, &step("conditions"), &response).is_valid);

    response.selected_condition_ids.clear();
    response.free_text_other_condition = "   ".to_string();
    assert!(!validate(&blueprint, &step("conditions"), &response).is_valid);

    response.free_text_other_condition = "Plantar fasciitis".to_string();
    assert!(validate(&blueprint, &step("conditions"), &response).is_valid);
}

#[test]
fn sensation_step_requires_a_selection() {
    let blueprint = blueprint();
    let mut response = response_at("sensations");

    assert!(!validate(&blueprint, &step("sensations"), &response).is_valid);
    response.selected_sensation_ids.insert("aching".to_string());
    assert!(validate(&blueprint, &step("sensations"), &response).is_valid);
}

#[test]
fn optional_steps_always_pass() {
    let blueprint = blueprint();
    let response = response_at("treatments");

    assert!(validate(&blueprint, &step("treatments"), &response).is_valid);
    assert!(validate(&blueprint, &step("goals"), &response).is_valid);
}

#[test]
fn unknown_steps_fail_open() {
    let outcome = validate(&blueprint(), &step("bonus-question"), &response_at("pain-profile"));

    assert!(outcome.is_valid);
    assert!(outcome.messages.is_empty());
}

#[test]
fn single_choice_steps_need_an_answer() {
    let mut response = response_at("urgency");

    assert!(!validate_kind(StepKind::SingleChoice(ChoiceField::Urgency), &response).is_valid);
    assert!(
        !validate_kind(StepKind::SingleChoice(ChoiceField::ActivityImpact), &response).is_valid
    );
    assert!(!validate_kind(StepKind::BudgetDecision, &response).is_valid);

    response.urgency_level = Some(UrgencyLevel::FewMonths);
    assert!(validate_kind(StepKind::SingleChoice(ChoiceField::Urgency), &response).is_valid);
}

#[test]
fn budget_range_only_required_when_budget_declared() {
    let mut response = response_at("budget-range");

    response.has_budget = Some(false);
    assert!(validate_kind(StepKind::BudgetRange, &response).is_valid);

    response.has_budget = Some(true);
    assert!(!validate_kind(StepKind::BudgetRange, &response).is_valid);

    response.budget_range = Some(BudgetRange::Over30k);
    assert!(validate_kind(StepKind::BudgetRange, &response).is_valid);
}

#[test]
fn pain_profile_checks_screening_answer_and_intensity() {
    let mut response = response_at("pain-profile");
    assert!(!validate_kind(StepKind::PainProfile, &response).is_valid);

    response.has_qualifying_pain_duration = Some(false);
    response.pain_intensity = Some(11);
    let outcome = validate_kind(StepKind::PainProfile, &response);
    assert!(!outcome.is_valid);
    assert!(outcome.messages[0].contains("between 1 and 10"));

    response.pain_intensity = Some(7);
    assert!(validate_kind(StepKind::PainProfile, &response).is_valid);
}

#[test]
fn contact_step_checks_name_email_and_optional_phone() {
    let blueprint = blueprint();
    let mut response = response_at("contact");
    response.name = "Al".to_string();
    response.email = "bad".to_string();

    let rejected = validate(&blueprint, &step("contact"), &response);
    assert!(!rejected.is_valid);
    assert_eq!(rejected.messages.len(), 1, "only the email is wrong");

    response.email = "a@b.co".to_string();
    assert!(validate(&blueprint, &step("contact"), &response).is_valid);

    response.phone = "555-0100".to_string();
    assert!(!validate(&blueprint, &step("contact"), &response).is_valid);

    response.phone = "+1 (555) 010-0199".to_string();
    assert!(validate(&blueprint, &step("contact"), &response).is_valid);
}

#[test]
fn contact_name_bounds_use_trimmed_length() {
    let mut response = response_at("contact");
    response.email = "a@b.co".to_string();

    response.name = "  J  ".to_string();
    assert!(!validate_kind(StepKind::Contact, &response).is_valid);

    response.name = "J".repeat(NAME_MAX_CHARS + 1);
    assert!(!validate_kind(StepKind::Contact, &response).is_valid);

    response.name = "J".repeat(NAME_MAX_CHARS);
    assert!(validate_kind(StepKind::Contact, &response).is_valid);
}
