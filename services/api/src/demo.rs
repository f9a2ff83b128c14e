use crate::infra::{build_service, load_catalogs, read_actions};
use assessment_funnel::config::AppConfig;
use assessment_funnel::error::AppError;
use assessment_funnel::workflows::assessment::{
    ActivityImpact, AssessmentFunnelService, BudgetRange, CatalogImporter, FunnelAction,
    FunnelSession, PainDuration, ReferenceCatalogs, ResponsePatch, StepKind, UrgencyLevel,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run a single persona instead of all of them
    #[arg(long, value_enum)]
    pub(crate) persona: Option<Persona>,
    /// Print the submission payload for personas that finish the funnel
    #[arg(long)]
    pub(crate) show_payload: bool,
}

#[derive(Args, Debug)]
pub(crate) struct WalkthroughArgs {
    /// JSON file holding an array of actions, e.g. [{"type":"ADVANCE_STEP"}]
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Print the final state as JSON instead of a readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Directory with conditions.csv, sensations.csv and treatments.csv
    /// (defaults to FUNNEL_CATALOG_DIR, then the built-in catalogs)
    #[arg(long)]
    pub(crate) dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Persona {
    /// Treatable back pain, budget set aside, wants relief now
    Ready,
    /// Only non-treatable conditions
    WaitingList,
    /// Treatable knee pain but no treatment budget
    NoBudget,
}

impl Persona {
    const ALL: [Persona; 3] = [Persona::Ready, Persona::WaitingList, Persona::NoBudget];

    fn label(self) -> &'static str {
        match self {
            Persona::Ready => "Ready to start",
            Persona::WaitingList => "Waiting list",
            Persona::NoBudget => "No budget",
        }
    }

    fn script(self) -> Vec<FunnelAction> {
        let answer = FunnelAction::UpdateFields;
        let advance = || FunnelAction::AdvanceStep;

        let mut actions = vec![
            answer(ResponsePatch {
                pain_intensity: Some(Some(7)),
                ..ResponsePatch::pain_profile(true, Some(PainDuration::OneToThreeYears))
            }),
            advance(),
        ];

        match self {
            Persona::WaitingList => {
                actions.push(answer(ResponsePatch::conditions([
                    "fibromyalgia",
                    "chronic-migraine",
                ])));
                actions.push(advance());
            }
            Persona::Ready | Persona::NoBudget => {
                let ready = self == Persona::Ready;
                let conditions: &[&str] = if ready {
                    &["chronic-back-neck", "sciatica"]
                } else {
                    &["knee-pain"]
                };
                let treatments: &[&str] = if ready {
                    &["physical-therapy", "cortisone-injections", "otc-pain-relievers"]
                } else {
                    &["braces-supports"]
                };

                actions.extend([
                    answer(ResponsePatch::conditions(conditions.iter().copied())),
                    advance(),
                    answer(ResponsePatch::sensations(["aching", "radiating"])),
                    advance(),
                    answer(ResponsePatch::treatments(treatments.iter().copied())),
                    advance(),
                    answer(ResponsePatch::activity_impact(if ready {
                        ActivityImpact::Significant
                    } else {
                        ActivityImpact::Moderate
                    })),
                    advance(),
                    answer(ResponsePatch::urgency(if ready {
                        UrgencyLevel::Immediate
                    } else {
                        UrgencyLevel::FewMonths
                    })),
                    advance(),
                    answer(ResponsePatch::budget(ready)),
                    advance(),
                ]);
                if ready {
                    actions.push(answer(ResponsePatch::budget_range(BudgetRange::From15kTo30k)));
                    actions.push(advance());
                }
                actions.extend([
                    answer(ResponsePatch::goals(if ready {
                        "Pick up my grandkids without wincing"
                    } else {
                        "Finish a 5k this fall"
                    })),
                    advance(),
                    answer(if ready {
                        ResponsePatch::contact("Dana Whitfield", "dana@example.com", "(515) 555-0142")
                    } else {
                        ResponsePatch::contact("Marcus Lee", "marcus.lee@example.net", "")
                    }),
                    advance(),
                ]);
            }
        }

        actions
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.funnel)?;

    let personas = match args.persona {
        Some(persona) => vec![persona],
        None => Persona::ALL.to_vec(),
    };

    println!("Assessment funnel demo");
    for persona in personas {
        println!("\n== Persona: {} ==", persona.label());
        let session = play(&service, persona.script(), true);
        render_session(&service, &session, args.show_payload)?;
    }

    Ok(())
}

pub(crate) fn run_walkthrough(args: WalkthroughArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.funnel)?;
    let actions = read_actions(&args.answers)?;

    let session = play(&service, actions, !args.json);
    if args.json {
        println!("{}", serde_json::to_string_pretty(session.state())?);
        Ok(())
    } else {
        render_session(&service, &session, true)
    }
}

pub(crate) fn run_catalog_check(args: CatalogArgs) -> Result<(), AppError> {
    let catalogs = match args.dir {
        Some(dir) => CatalogImporter::from_dir(dir)?,
        None => load_catalogs(&AppConfig::load()?.funnel)?,
    };

    render_catalogs(&catalogs);
    Ok(())
}

/// Dispatch every action in order; enter results when the script reaches them.
fn play(service: &AssessmentFunnelService, actions: Vec<FunnelAction>, trace: bool) -> FunnelSession {
    let mut session = service.start_session();

    for action in actions {
        let label = action.label();
        let state = session.dispatch(action);
        if trace {
            match state.error_message() {
                Some(message) => println!("  {label:<22} rejected: {message}"),
                None if label == "ADVANCE_STEP" || label == "RETREAT_STEP" => println!(
                    "  {label:<22} -> {} ({} steps)",
                    state.response.current_step_id, state.response.total_steps
                ),
                None => {}
            }
        }
    }

    let at_results = service.blueprint().kind_of(&session.response().current_step_id)
        == Some(StepKind::Results);
    if at_results {
        session.complete();
    }

    session
}

fn render_session(
    service: &AssessmentFunnelService,
    session: &FunnelSession,
    show_payload: bool,
) -> Result<(), AppError> {
    let response = session.response();
    println!(
        "Final step: {} | status: {}",
        response.current_step_id,
        response.qualification_status.label()
    );
    if let Some(reason) = &response.disqualification_reason {
        println!("Reason: {reason}");
    }

    if let Some(result) = &session.state().personalization {
        println!("\n{}", result.summary_paragraph);
        println!("{}", result.treatment_outlook);
        for card in &result.treatment_cards {
            println!(
                "- {} [{}]\n    fixed: {}\n    missed: {}\n    result: {}",
                card.treatment.display_name,
                card.treatment.category.label(),
                card.what_it_fixed,
                card.what_it_missed,
                card.result_narrative
            );
        }
    }

    if show_payload {
        match service.submission(session.state()) {
            Ok(submission) => {
                println!(
                    "Lead: {}{}",
                    submission.lead.status.label(),
                    submission
                        .lead
                        .reason
                        .as_deref()
                        .map(|reason| format!(" ({reason})"))
                        .unwrap_or_default()
                );
                println!("Submission payload:\n{}", serde_json::to_string_pretty(&submission)?);
            }
            Err(err) => println!("Submission not available: {err}"),
        }
    }

    Ok(())
}

fn render_catalogs(catalogs: &ReferenceCatalogs) {
    println!(
        "Reference catalogs: {} conditions | {} sensations | {} treatments",
        catalogs.conditions.len(),
        catalogs.sensations.len(),
        catalogs.treatments.len()
    );

    println!("\nCondition groups");
    for (group, conditions) in catalogs.condition_groups() {
        let treatable = conditions
            .iter()
            .filter(|condition| condition.is_treatable())
            .count();
        println!(
            "- {}: {} conditions ({} treatable)",
            group.unwrap_or("Ungrouped"),
            conditions.len(),
            treatable
        );
    }

    println!("\nTreatments");
    for treatment in catalogs.treatments.entries() {
        println!(
            "- {} [{}]: {}",
            treatment.display_name,
            treatment.category.label(),
            treatment.what_it_addressed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessment_funnel::workflows::assessment::QualificationStatus;

    #[test]
    fn ready_persona_finishes_qualified() {
        let service = AssessmentFunnelService::standard();
        let session = play(&service, Persona::Ready.script(), false);

        assert_eq!(session.response().current_step_id.as_str(), "results");
        assert_eq!(
            session.response().qualification_status,
            QualificationStatus::Qualified
        );
        let result = session
            .state()
            .personalization
            .as_ref()
            .expect("personalization recorded");
        assert_eq!(result.treatment_cards.len(), 3);

        let submission = service
            .submission(session.state())
            .expect("ready persona submits");
        assert_eq!(submission.lead.status, QualificationStatus::Qualified);
    }

    #[test]
    fn waiting_list_persona_stops_early() {
        let service = AssessmentFunnelService::standard();
        let session = play(&service, Persona::WaitingList.script(), false);

        assert_eq!(session.response().current_step_id.as_str(), "waiting-list");
        assert_eq!(session.response().total_steps, 3);
        assert!(session.state().personalization.is_none());
    }

    #[test]
    fn no_budget_persona_is_a_disqualified_lead() {
        let service = AssessmentFunnelService::standard();
        let session = play(&service, Persona::NoBudget.script(), false);

        assert_eq!(session.response().current_step_id.as_str(), "results");
        let submission = service
            .submission(session.state())
            .expect("no budget persona submits");
        assert_eq!(submission.lead.status, QualificationStatus::Disqualified);
        assert_eq!(
            submission.lead.reason.as_deref(),
            Some("No budget allocated for treatment")
        );
    }
}
