//! Assessment Flow Engine: answer state, step gating, branching navigation and the
//! personalized results narrative for the pain qualification funnel.

pub mod blueprint;
pub mod catalog;
pub mod domain;
pub mod lead;
pub mod navigation;
pub mod personalization;
pub mod router;
pub mod sanitize;
pub mod service;
pub mod store;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use blueprint::{ChoiceField, FunnelBlueprint, StepKind, StepTemplate};
pub use catalog::{
    CatalogImportError, CatalogImporter, Condition, ConditionCategory, ReferenceCatalogs,
    Sensation, Treatment, TreatmentCategory,
};
pub use domain::{
    ActivityImpact, AssessmentResponse, BudgetRange, PainDuration, QualificationStatus,
    ResponsePatch, StepId, UrgencyLevel,
};
pub use lead::{assess_lead, LeadAssessment};
pub use navigation::{is_disqualifying, next_step, previous_step, step_position, total_steps};
pub use personalization::{join_natural, PersonalizationEngine, PersonalizationResult, TreatmentCard};
pub use router::assessment_router;
pub use service::{AssessmentFunnelService, CatalogView, NavigationView};
pub use store::{
    Clock, FixedClock, FunnelAction, FunnelSession, FunnelState, FunnelStore, SystemClock,
    TransitionError,
};
pub use submission::{AssessmentSubmission, SubmissionError, SubmissionOptions};
pub use validation::{validate, StepValidation};
