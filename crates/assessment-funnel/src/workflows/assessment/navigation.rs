//! Step sequencing. Every function here is total: an unknown step resolves to the first
//! step instead of failing.

use super::blueprint::{FunnelBlueprint, StepKind};
use super::catalog::{ConditionCategory, ReferenceCatalogs};
use super::domain::{AssessmentResponse, QualificationStatus, StepId};

/// True when at least one condition is selected and every selected id is a known
/// non-treatable condition. Unknown ids and free text never disqualify.
pub fn is_disqualifying(catalogs: &ReferenceCatalogs, response: &AssessmentResponse) -> bool {
    !response.selected_condition_ids.is_empty()
        && response.selected_condition_ids.iter().all(|id| {
            catalogs
                .condition(id)
                .is_some_and(|condition| condition.category == ConditionCategory::NonTreatable)
        })
}

pub fn next_step(
    blueprint: &FunnelBlueprint,
    catalogs: &ReferenceCatalogs,
    current: &StepId,
    response: &AssessmentResponse,
) -> StepId {
    let Some(kind) = blueprint.kind_of(current) else {
        return blueprint.first_step();
    };

    match kind {
        kind if kind.is_terminal() => current.clone(),
        StepKind::ConditionSelection if is_disqualifying(catalogs, response) => {
            blueprint.waiting_list_step()
        }
        StepKind::BudgetDecision if response.has_budget.is_none() => current.clone(),
        _ => {
            let Some(position) = blueprint.position(current) else {
                return current.clone();
            };
            blueprint.steps()[position + 1..]
                .iter()
                .find(|template| template.kind.is_included(response))
                .map(|template| template.id())
                .unwrap_or_else(|| current.clone())
        }
    }
}

pub fn previous_step(
    blueprint: &FunnelBlueprint,
    current: &StepId,
    response: &AssessmentResponse,
) -> StepId {
    let Some(kind) = blueprint.kind_of(current) else {
        return blueprint.first_step();
    };

    if kind == StepKind::WaitingList {
        return blueprint
            .first_of_kind(StepKind::ConditionSelection)
            .map(|template| template.id())
            .unwrap_or_else(|| blueprint.first_step());
    }

    let Some(position) = blueprint.position(current) else {
        return blueprint.first_step();
    };

    blueprint.steps()[..position]
        .iter()
        .rev()
        .find(|template| template.kind.is_included(response))
        .map(|template| template.id())
        .unwrap_or_else(|| current.clone())
}

/// Step count for progress display, derived from the branch state only.
pub fn total_steps(
    blueprint: &FunnelBlueprint,
    current: &StepId,
    has_budget: Option<bool>,
    status: QualificationStatus,
) -> usize {
    let disqualified = status == QualificationStatus::Disqualified
        || blueprint.kind_of(current) == Some(StepKind::WaitingList);

    if disqualified {
        return disqualified_path_len(blueprint);
    }

    blueprint
        .steps()
        .iter()
        .filter(|template| template.kind != StepKind::BudgetRange || has_budget == Some(true))
        .count()
}

/// 1-based position of `current` on the path implied by the response. Never exceeds
/// `total_steps` for the same response.
pub fn step_position(
    blueprint: &FunnelBlueprint,
    current: &StepId,
    response: &AssessmentResponse,
) -> usize {
    if blueprint.kind_of(current) == Some(StepKind::WaitingList) {
        return disqualified_path_len(blueprint);
    }

    let position = match blueprint.position(current) {
        Some(position) => {
            blueprint.steps()[..position]
                .iter()
                .filter(|template| template.kind.is_included(response))
                .count()
                + 1
        }
        None => 1,
    };

    if response.qualification_status == QualificationStatus::Disqualified {
        position.min(disqualified_path_len(blueprint))
    } else {
        position
    }
}

// Steps up to and including condition selection, plus the waiting list.
fn disqualified_path_len(blueprint: &FunnelBlueprint) -> usize {
    blueprint
        .steps()
        .iter()
        .position(|template| template.kind == StepKind::ConditionSelection)
        .map(|position| position + 2)
        .unwrap_or(1)
}
