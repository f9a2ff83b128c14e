//! Response State Store: a reducer over [`FunnelState`] plus a single-writer session.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::blueprint::{FunnelBlueprint, StepKind};
use super::catalog::ReferenceCatalogs;
use super::domain::{AssessmentResponse, QualificationStatus, ResponsePatch, StepId};
use super::navigation::{is_disqualifying, next_step, previous_step, total_steps};
use super::personalization::{join_natural, PersonalizationEngine, PersonalizationResult};
use super::validation::validate;

/// Source of timestamps for `startedAt` and `completedAt`.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Transition that could not be applied. Recorded on the state, never raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionError {
    #[error("already at the final step ({step}); there is nowhere further to go")]
    AtTerminalStep { step: StepId },
    #[error("already at the first step ({step}); there is nothing to go back to")]
    AtFirstStep { step: StepId },
    #[error("step {step} is incomplete: {}", .messages.join(" "))]
    StepIncomplete { step: StepId, messages: Vec<String> },
}

/// Everything a session carries between dispatches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelState {
    pub response: AssessmentResponse,
    #[serde(default)]
    pub personalization: Option<PersonalizationResult>,
    #[serde(default)]
    pub error: Option<TransitionError>,
}

impl FunnelState {
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunnelAction {
    UpdateFields(ResponsePatch),
    AdvanceStep,
    RetreatStep,
    Disqualify { reason: String },
    Qualify,
    Reset,
    RecordPersonalization(Box<PersonalizationResult>),
}

impl FunnelAction {
    pub const fn label(&self) -> &'static str {
        match self {
            FunnelAction::UpdateFields(_) => "UPDATE_FIELDS",
            FunnelAction::AdvanceStep => "ADVANCE_STEP",
            FunnelAction::RetreatStep => "RETREAT_STEP",
            FunnelAction::Disqualify { .. } => "DISQUALIFY",
            FunnelAction::Qualify => "QUALIFY",
            FunnelAction::Reset => "RESET",
            FunnelAction::RecordPersonalization(_) => "RECORD_PERSONALIZATION",
        }
    }
}

/// Pure transition function over funnel state.
#[derive(Debug, Clone)]
pub struct FunnelStore {
    blueprint: Arc<FunnelBlueprint>,
    catalogs: Arc<ReferenceCatalogs>,
    clock: Arc<dyn Clock>,
}

impl FunnelStore {
    pub fn new(
        blueprint: Arc<FunnelBlueprint>,
        catalogs: Arc<ReferenceCatalogs>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            blueprint,
            catalogs,
            clock,
        }
    }

    pub fn blueprint(&self) -> &FunnelBlueprint {
        &self.blueprint
    }

    pub fn catalogs(&self) -> &ReferenceCatalogs {
        &self.catalogs
    }

    pub fn initial_state(&self) -> FunnelState {
        let first = self.blueprint.first_step();
        let total = total_steps(&self.blueprint, &first, None, QualificationStatus::Pending);
        FunnelState {
            response: AssessmentResponse::new(first, total, self.clock.now()),
            personalization: None,
            error: None,
        }
    }

    /// Apply one action. The input is never modified; a rejected action returns the same
    /// answers with `error` set.
    pub fn apply(&self, state: &FunnelState, action: FunnelAction) -> FunnelState {
        let label = action.label();
        let mut next = state.clone();

        match action {
            FunnelAction::UpdateFields(patch) => {
                next.response.apply_patch(patch);
                next.error = None;
            }
            FunnelAction::AdvanceStep => self.advance(&mut next),
            FunnelAction::RetreatStep => self.retreat(&mut next),
            FunnelAction::Disqualify { reason } => self.disqualify(&mut next, reason),
            FunnelAction::Qualify => {
                next.response.qualification_status = QualificationStatus::Qualified;
                next.response.disqualification_reason = None;
                next.error = None;
            }
            FunnelAction::Reset => next = self.initial_state(),
            FunnelAction::RecordPersonalization(result) => {
                next.personalization = Some(*result);
                self.stamp_completed(&mut next.response);
            }
        }

        let response = &mut next.response;
        response.total_steps = total_steps(
            &self.blueprint,
            &response.current_step_id,
            response.has_budget,
            response.qualification_status,
        );

        debug!(
            action = label,
            step = %response.current_step_id,
            status = response.qualification_status.label(),
            rejected = next.error.is_some(),
            "funnel transition applied"
        );

        next
    }

    fn advance(&self, state: &mut FunnelState) {
        let current = state.response.current_step_id.clone();

        if self.blueprint.is_terminal(&current) {
            state.error = Some(TransitionError::AtTerminalStep { step: current });
            return;
        }

        let validation = validate(&self.blueprint, &current, &state.response);
        if !validation.is_valid {
            state.error = Some(TransitionError::StepIncomplete {
                step: current,
                messages: validation.messages,
            });
            return;
        }

        let target = next_step(&self.blueprint, &self.catalogs, &current, &state.response);
        let entering_waiting_list =
            self.blueprint.kind_of(&target) == Some(StepKind::WaitingList);
        state.response.current_step_id = target;
        state.error = None;

        if entering_waiting_list {
            let reason = self.waiting_list_reason(&state.response);
            self.disqualify(state, reason);
        }
    }

    fn retreat(&self, state: &mut FunnelState) {
        let current = state.response.current_step_id.clone();

        if current == self.blueprint.first_step() {
            state.error = Some(TransitionError::AtFirstStep { step: current });
            return;
        }

        let leaving = self.blueprint.kind_of(&current);
        if leaving == Some(StepKind::WaitingList) {
            state.response.qualification_status = QualificationStatus::Pending;
            state.response.disqualification_reason = None;
        }
        if leaving.is_some_and(StepKind::is_terminal) {
            state.personalization = None;
        }

        state.response.current_step_id =
            previous_step(&self.blueprint, &current, &state.response);
        state.error = None;
    }

    fn disqualify(&self, state: &mut FunnelState, reason: String) {
        state.response.qualification_status = QualificationStatus::Disqualified;
        state.response.disqualification_reason = Some(reason);
        self.stamp_completed(&mut state.response);
    }

    fn stamp_completed(&self, response: &mut AssessmentResponse) {
        if response.completed_at.is_none() {
            response.completed_at = Some(self.clock.now());
        }
    }

    fn waiting_list_reason(&self, response: &AssessmentResponse) -> String {
        let names: Vec<&str> = self
            .catalogs
            .conditions
            .resolve(&response.selected_condition_ids)
            .into_iter()
            .map(|condition| condition.display_name.as_str())
            .collect();
        format!(
            "{} {} not currently treatable with our program.",
            join_natural(&names),
            if names.len() == 1 { "is" } else { "are" }
        )
    }
}

/// One respondent's funnel. Dispatches take `&mut self`, so transitions are serialised.
#[derive(Debug, Clone)]
pub struct FunnelSession {
    store: FunnelStore,
    engine: Arc<PersonalizationEngine>,
    state: FunnelState,
}

impl FunnelSession {
    pub fn new(store: FunnelStore, engine: Arc<PersonalizationEngine>) -> Self {
        let state = store.initial_state();
        Self::resume(store, engine, state)
    }

    pub fn resume(store: FunnelStore, engine: Arc<PersonalizationEngine>, state: FunnelState) -> Self {
        Self {
            store,
            engine,
            state,
        }
    }

    pub fn state(&self) -> &FunnelState {
        &self.state
    }

    pub fn response(&self) -> &AssessmentResponse {
        &self.state.response
    }

    pub fn into_state(self) -> FunnelState {
        self.state
    }

    pub fn dispatch(&mut self, action: FunnelAction) -> &FunnelState {
        self.state = self.store.apply(&self.state, action);
        &self.state
    }

    /// Build the results narrative from the current answers and record it. The status is
    /// settled against the final condition selection: disqualified when every selected
    /// condition is non-treatable, qualified when a treatable one resolved.
    pub fn complete(&mut self) -> PersonalizationResult {
        let result = self.engine.generate(&self.state.response);
        self.dispatch(FunnelAction::RecordPersonalization(Box::new(result.clone())));

        let already_disqualified =
            self.state.response.qualification_status == QualificationStatus::Disqualified;
        if is_disqualifying(self.store.catalogs(), &self.state.response) {
            if !already_disqualified {
                let reason = self.store.waiting_list_reason(&self.state.response);
                self.dispatch(FunnelAction::Disqualify { reason });
            }
        } else if result.is_qualified && !already_disqualified {
            self.dispatch(FunnelAction::Qualify);
        }
        result
    }
}
