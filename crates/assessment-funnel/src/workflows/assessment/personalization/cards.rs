use serde::{Deserialize, Serialize};

use crate::workflows::assessment::catalog::{Treatment, TreatmentCategory};

pub const WHAT_IT_MISSED: &str =
    "It never repaired the underlying cellular damage that keeps the pain coming back.";

pub const UNTREATED_OUTLOOK: &str = "You have not tried any treatments yet, which means all \
underlying damage remains fully unaddressed.";

pub const TREATED_OUTLOOK: &str = "Each treatment you tried helped with symptoms, but none \
of them reached the damage underneath.";

/// Fixed/missed/result triple for one treatment the user already tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentCard {
    pub treatment: Treatment,
    pub what_it_fixed: String,
    pub what_it_missed: String,
    pub result_narrative: String,
}

impl TreatmentCard {
    pub fn for_treatment(treatment: &Treatment) -> Self {
        Self {
            what_it_fixed: treatment.what_it_addressed.clone(),
            what_it_missed: WHAT_IT_MISSED.to_string(),
            result_narrative: result_narrative(treatment.category).to_string(),
            treatment: treatment.clone(),
        }
    }
}

pub const fn result_narrative(category: TreatmentCategory) -> &'static str {
    match category {
        TreatmentCategory::Medication | TreatmentCategory::Device => {
            "Reduced symptoms temporarily, but the root cause was left unaddressed."
        }
        TreatmentCategory::Procedure => "Provided temporary relief, but the symptoms returned.",
        TreatmentCategory::Therapy => "Improved function, but the damage persisted.",
        TreatmentCategory::MindBody => "Improved coping, but the pain persisted at the root.",
    }
}
