use serde::{Deserialize, Serialize};

use super::domain::{AssessmentResponse, BudgetRange, QualificationStatus, UrgencyLevel};

/// Sales-side verdict from budget and urgency. Independent of the condition-based
/// funnel status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAssessment {
    pub status: QualificationStatus,
    pub reason: Option<String>,
}

/// Why a lead was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadDisqualifier {
    NoBudget,
    BudgetBelowMinimum,
}

impl LeadDisqualifier {
    pub fn summary(self) -> &'static str {
        match self {
            LeadDisqualifier::NoBudget => "No budget allocated for treatment",
            LeadDisqualifier::BudgetBelowMinimum => "Budget below minimum treatment cost",
        }
    }
}

impl LeadAssessment {
    pub fn pending() -> Self {
        Self {
            status: QualificationStatus::Pending,
            reason: None,
        }
    }

    pub fn from_response(response: &AssessmentResponse) -> Self {
        assess_lead(
            response.has_budget,
            response.budget_range,
            response.urgency_level,
        )
    }
}

pub fn assess_lead(
    has_budget: Option<bool>,
    budget_range: Option<BudgetRange>,
    urgency: Option<UrgencyLevel>,
) -> LeadAssessment {
    if let Some(disqualifier) = disqualifier(has_budget, budget_range) {
        return LeadAssessment {
            status: QualificationStatus::Disqualified,
            reason: Some(disqualifier.summary().to_string()),
        };
    }

    let strong_budget = matches!(
        budget_range,
        Some(BudgetRange::From15kTo30k | BudgetRange::Over30k)
    );
    let urgent = matches!(
        urgency,
        Some(UrgencyLevel::Immediate | UrgencyLevel::WithinMonth)
    );

    if strong_budget || urgent {
        LeadAssessment {
            status: QualificationStatus::Qualified,
            reason: None,
        }
    } else {
        LeadAssessment::pending()
    }
}

fn disqualifier(
    has_budget: Option<bool>,
    budget_range: Option<BudgetRange>,
) -> Option<LeadDisqualifier> {
    if has_budget == Some(false) {
        Some(LeadDisqualifier::NoBudget)
    } else if budget_range == Some(BudgetRange::Under5k) {
        Some(LeadDisqualifier::BudgetBelowMinimum)
    } else {
        None
    }
}
