use assessment_funnel::workflows::assessment::{
    next_step, AssessmentFunnelService, BudgetRange, FunnelAction, FunnelBlueprint,
    QualificationStatus, ReferenceCatalogs, ResponsePatch, StepId,
};

fn step(key: &str) -> StepId {
    StepId::from(key)
}

#[test]
fn back_pain_without_treatments_is_qualified() {
    let service = AssessmentFunnelService::standard();
    let mut session = service.start_session();

    session.dispatch(FunnelAction::UpdateFields(ResponsePatch {
        selected_condition_ids: Some(["chronic-back-neck".to_string()].into()),
        selected_sensation_ids: Some(["burning".to_string()].into()),
        ..ResponsePatch::default()
    }));

    let result = service.personalize(session.response());

    assert!(result.is_qualified);
    assert!(result.treatment_cards.is_empty());
    assert!(
        result
            .treatment_outlook
            .contains("all underlying damage remains fully unaddressed"),
        "untreated outlook should call out the unaddressed damage"
    );
}

#[test]
fn fibromyalgia_only_lands_on_waiting_list() {
    let service = AssessmentFunnelService::standard();
    let mut session = service.start_session();

    session.dispatch(FunnelAction::UpdateFields(ResponsePatch::pain_profile(
        true, None,
    )));
    session.dispatch(FunnelAction::AdvanceStep);
    session.dispatch(FunnelAction::UpdateFields(ResponsePatch::conditions([
        "fibromyalgia",
    ])));
    let state = session.dispatch(FunnelAction::AdvanceStep);

    assert_eq!(state.response.current_step_id, step("waiting-list"));
    assert_eq!(
        state.response.qualification_status,
        QualificationStatus::Disqualified
    );
    assert!(state.response.disqualification_reason.is_some());
    assert!(state.response.completed_at.is_some());
}

#[test]
fn budget_answer_decides_whether_range_step_is_shown() {
    let blueprint = FunnelBlueprint::standard();
    let catalogs = ReferenceCatalogs::standard();
    let service = AssessmentFunnelService::standard();

    let with_budget = service.dispatch_all(
        None,
        [
            FunnelAction::UpdateFields(ResponsePatch::budget(true)),
            FunnelAction::UpdateFields(ResponsePatch::budget_range(BudgetRange::From5kTo15k)),
        ],
    );
    let after_budget = next_step(&blueprint, &catalogs, &step("budget"), &with_budget.response);
    assert_eq!(after_budget, step("budget-range"));
    let after_range = next_step(
        &blueprint,
        &catalogs,
        &step("budget-range"),
        &with_budget.response,
    );

    let without_budget =
        service.dispatch_all(None, [FunnelAction::UpdateFields(ResponsePatch::budget(false))]);
    let skipped = next_step(
        &blueprint,
        &catalogs,
        &step("budget"),
        &without_budget.response,
    );

    assert_eq!(skipped, after_range);
    assert_eq!(skipped, step("goals"));
}
