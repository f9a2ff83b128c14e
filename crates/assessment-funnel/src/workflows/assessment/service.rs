use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::blueprint::{FunnelBlueprint, StepTemplate};
use super::catalog::{Condition, ReferenceCatalogs, Sensation, Treatment};
use super::domain::{AssessmentResponse, StepId};
use super::navigation::{next_step, previous_step, step_position, total_steps};
use super::personalization::{PersonalizationEngine, PersonalizationResult};
use super::store::{Clock, FunnelAction, FunnelSession, FunnelState, FunnelStore, SystemClock};
use super::submission::{AssessmentSubmission, SubmissionError, SubmissionOptions};
use super::validation::{validate, StepValidation};
use crate::config::FunnelConfig;

/// Service composing the blueprint, catalogs, reducer and personalization engine.
#[derive(Debug, Clone)]
pub struct AssessmentFunnelService {
    store: FunnelStore,
    engine: Arc<PersonalizationEngine>,
    options: SubmissionOptions,
}

impl AssessmentFunnelService {
    pub fn new(catalogs: Arc<ReferenceCatalogs>, config: &FunnelConfig) -> Self {
        Self::with_clock(catalogs, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        catalogs: Arc<ReferenceCatalogs>,
        config: &FunnelConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let blueprint = Arc::new(FunnelBlueprint::standard());
        let engine = Arc::new(PersonalizationEngine::new(catalogs.clone()));

        Self {
            store: FunnelStore::new(blueprint, catalogs, clock),
            engine,
            options: SubmissionOptions::from(config),
        }
    }

    /// Built-in catalogs and default settings.
    pub fn standard() -> Self {
        Self::new(
            Arc::new(ReferenceCatalogs::standard()),
            &FunnelConfig::default(),
        )
    }

    pub fn blueprint(&self) -> &FunnelBlueprint {
        self.store.blueprint()
    }

    pub fn catalogs(&self) -> &ReferenceCatalogs {
        self.store.catalogs()
    }

    pub fn start_session(&self) -> FunnelSession {
        let session = FunnelSession::new(self.store.clone(), self.engine.clone());
        info!(
            assessment_id = %session.response().assessment_id,
            "assessment session started"
        );
        session
    }

    pub fn resume(&self, state: FunnelState) -> FunnelSession {
        FunnelSession::resume(self.store.clone(), self.engine.clone(), state)
    }

    pub fn initial_state(&self) -> FunnelState {
        self.store.initial_state()
    }

    /// Apply actions in order, starting from `state` or a fresh session.
    pub fn dispatch_all<I>(&self, state: Option<FunnelState>, actions: I) -> FunnelState
    where
        I: IntoIterator<Item = FunnelAction>,
    {
        let start = state.unwrap_or_else(|| self.store.initial_state());
        actions
            .into_iter()
            .fold(start, |current, action| self.store.apply(&current, action))
    }

    pub fn validate(&self, step: &StepId, response: &AssessmentResponse) -> StepValidation {
        validate(self.store.blueprint(), step, response)
    }

    pub fn navigate(&self, step: &StepId, response: &AssessmentResponse) -> NavigationView {
        let blueprint = self.store.blueprint();
        NavigationView {
            current: step.clone(),
            next: next_step(blueprint, self.store.catalogs(), step, response),
            previous: previous_step(blueprint, step, response),
            position: step_position(blueprint, step, response),
            total_steps: total_steps(
                blueprint,
                step,
                response.has_budget,
                response.qualification_status,
            ),
        }
    }

    pub fn personalize(&self, response: &AssessmentResponse) -> PersonalizationResult {
        self.engine.generate(response)
    }

    /// Resume a finished session, record its personalization and settle the status.
    pub fn complete(&self, state: FunnelState) -> Result<FunnelState, SubmissionError> {
        let step = &state.response.current_step_id;
        if !self.store.blueprint().is_terminal(step) {
            return Err(SubmissionError::NotFinished { step: step.clone() });
        }

        let mut session = self.resume(state);
        session.complete();
        info!(
            assessment_id = %session.response().assessment_id,
            status = session.response().qualification_status.label(),
            "assessment session completed"
        );
        Ok(session.into_state())
    }

    pub fn submission(&self, state: &FunnelState) -> Result<AssessmentSubmission, SubmissionError> {
        AssessmentSubmission::from_state(self.store.blueprint(), state, &self.options)
    }

    pub fn catalog_view(&self) -> CatalogView {
        let catalogs = self.store.catalogs();
        CatalogView {
            steps: self.store.blueprint().steps().to_vec(),
            condition_groups: catalogs
                .condition_groups()
                .into_iter()
                .map(|(group, conditions)| ConditionGroupView {
                    group: group.map(str::to_string),
                    conditions: conditions.into_iter().cloned().collect(),
                })
                .collect(),
            sensations: catalogs.sensations.entries().to_vec(),
            treatments: catalogs.treatments.entries().to_vec(),
        }
    }
}

/// Where a step sits and where it leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    pub current: StepId,
    pub next: StepId,
    pub previous: StepId,
    pub position: usize,
    pub total_steps: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroupView {
    pub group: Option<String>,
    pub conditions: Vec<Condition>,
}

/// Everything a client needs to render pickers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub steps: Vec<StepTemplate>,
    pub condition_groups: Vec<ConditionGroupView>,
    pub sensations: Vec<Sensation>,
    pub treatments: Vec<Treatment>,
}
