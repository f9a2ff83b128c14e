use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blueprint::{FunnelBlueprint, StepKind};
use super::domain::{
    ActivityImpact, BudgetRange, PainDuration, QualificationStatus, StepId, UrgencyLevel,
};
use super::lead::LeadAssessment;
use super::sanitize::{sanitize_email, sanitize_phone, sanitize_text};
use super::store::FunnelState;
use super::validation::validate_kind;
use crate::config::FunnelConfig;

/// Errors raised while turning a session into a submission payload.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("assessment has not reached a final step (currently at {step})")]
    NotFinished { step: StepId },
    #[error("at least one condition must be selected")]
    MissingConditions,
    #[error("at least one sensation must be selected")]
    MissingSensations,
    #[error("contact details are invalid: {}", .messages.join(" "))]
    InvalidContact { messages: Vec<String> },
}

/// Knobs applied while building the payload.
#[derive(Debug, Clone)]
pub struct SubmissionOptions {
    pub lead_scoring_enabled: bool,
    pub free_text_max_length: usize,
    pub lead_source: String,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self::from(&FunnelConfig::default())
    }
}

impl From<&FunnelConfig> for SubmissionOptions {
    fn from(config: &FunnelConfig) -> Self {
        Self {
            lead_scoring_enabled: config.lead_scoring_enabled,
            free_text_max_length: config.free_text_max_length,
            lead_source: config.lead_source.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentData {
    pub conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_condition: Option<String>,
    pub sensations: Vec<String>,
    pub duration: Option<PainDuration>,
    pub intensity: Option<u8>,
    pub previous_treatments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_treatment: Option<String>,
    pub has_budget: Option<bool>,
    pub budget_range: Option<BudgetRange>,
    pub urgency: Option<UrgencyLevel>,
    pub activity_impact: Option<ActivityImpact>,
    pub goals: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Finished assessment in the shape the intake backend accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub assessment_id: Uuid,
    pub assessment: AssessmentData,
    pub contact_info: ContactInfo,
    pub lead_source: String,
    pub lead: LeadAssessment,
    pub qualification_status: QualificationStatus,
    pub disqualification_reason: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl AssessmentSubmission {
    pub fn from_state(
        blueprint: &FunnelBlueprint,
        state: &FunnelState,
        options: &SubmissionOptions,
    ) -> Result<Self, SubmissionError> {
        let response = &state.response;

        if !blueprint.is_terminal(&response.current_step_id) {
            return Err(SubmissionError::NotFinished {
                step: response.current_step_id.clone(),
            });
        }
        if response.selected_condition_ids.is_empty() {
            return Err(SubmissionError::MissingConditions);
        }
        if response.selected_sensation_ids.is_empty() {
            return Err(SubmissionError::MissingSensations);
        }

        let contact = validate_kind(StepKind::Contact, response);
        if !contact.is_valid {
            return Err(SubmissionError::InvalidContact {
                messages: contact.messages,
            });
        }

        let limit = options.free_text_max_length;
        let optional_text = |raw: &str| {
            let cleaned = sanitize_text(raw, limit);
            (!cleaned.is_empty()).then_some(cleaned)
        };

        let lead = if options.lead_scoring_enabled {
            LeadAssessment::from_response(response)
        } else {
            LeadAssessment::pending()
        };

        Ok(Self {
            assessment_id: response.assessment_id,
            assessment: AssessmentData {
                conditions: response.selected_condition_ids.iter().cloned().collect(),
                other_condition: optional_text(&response.free_text_other_condition),
                sensations: response.selected_sensation_ids.iter().cloned().collect(),
                duration: response.pain_duration,
                intensity: response.pain_intensity,
                previous_treatments: response.selected_treatment_ids.iter().cloned().collect(),
                other_treatment: optional_text(&response.free_text_other_treatment),
                has_budget: response.has_budget,
                budget_range: response.budget_range,
                urgency: response.urgency_level,
                activity_impact: response.activity_impact,
                goals: optional_text(&response.goals_text),
            },
            contact_info: ContactInfo {
                name: sanitize_text(&response.name, limit),
                email: sanitize_email(&response.email),
                phone: sanitize_phone(&response.phone),
            },
            lead_source: options.lead_source.clone(),
            lead,
            qualification_status: response.qualification_status,
            disqualification_reason: response.disqualification_reason.clone(),
            started_at: response.started_at,
            completed_at: response.completed_at,
        })
    }
}
