mod cards;
mod narrative;

pub use cards::{result_narrative, TreatmentCard, UNTREATED_OUTLOOK, WHAT_IT_MISSED};
pub use narrative::join_natural;

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::{Catalog, CatalogEntry, Condition, ReferenceCatalogs, Sensation};
use super::domain::AssessmentResponse;
use narrative::{NarrativeContext, FALLBACK_SUMMARY};

/// Derived view of a finished response. Rebuilt every time the results step is entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationResult {
    pub resolved_conditions: Vec<Condition>,
    pub resolved_sensations: Vec<Sensation>,
    pub treatment_cards: Vec<TreatmentCard>,
    pub treatment_outlook: String,
    pub summary_paragraph: String,
    pub is_qualified: bool,
}

impl PersonalizationResult {
    fn fallback() -> Self {
        Self {
            resolved_conditions: Vec::new(),
            resolved_sensations: Vec::new(),
            treatment_cards: Vec::new(),
            treatment_outlook: String::new(),
            summary_paragraph: FALLBACK_SUMMARY.to_string(),
            is_qualified: false,
        }
    }
}

/// Turns answers plus the reference catalogs into the results narrative.
#[derive(Debug)]
pub struct PersonalizationEngine {
    catalogs: Arc<ReferenceCatalogs>,
}

impl PersonalizationEngine {
    pub fn new(catalogs: Arc<ReferenceCatalogs>) -> Self {
        Self { catalogs }
    }

    pub fn generate(&self, response: &AssessmentResponse) -> PersonalizationResult {
        let conditions = resolve_logged(
            &self.catalogs.conditions,
            &response.selected_condition_ids,
            "condition",
        );
        let sensations = resolve_logged(
            &self.catalogs.sensations,
            &response.selected_sensation_ids,
            "sensation",
        );

        if conditions.is_empty() || sensations.is_empty() {
            debug!(
                assessment_id = %response.assessment_id,
                conditions = conditions.len(),
                sensations = sensations.len(),
                "personalization fell back to generic narrative"
            );
            return PersonalizationResult::fallback();
        }

        let treatments = resolve_logged(
            &self.catalogs.treatments,
            &response.selected_treatment_ids,
            "treatment",
        );
        let treatment_cards: Vec<TreatmentCard> = treatments
            .iter()
            .map(|treatment| TreatmentCard::for_treatment(treatment))
            .collect();
        let treatment_outlook = if treatment_cards.is_empty() {
            cards::UNTREATED_OUTLOOK
        } else {
            cards::TREATED_OUTLOOK
        };

        let summary_paragraph = narrative::compose(&NarrativeContext {
            conditions: &conditions,
            sensations: &sensations,
            duration: response.duration_phrase(),
            treatment_count: treatment_cards.len(),
        });

        PersonalizationResult {
            is_qualified: conditions.iter().any(|condition| condition.is_treatable()),
            resolved_conditions: conditions.into_iter().cloned().collect(),
            resolved_sensations: sensations.into_iter().cloned().collect(),
            treatment_cards,
            treatment_outlook: treatment_outlook.to_string(),
            summary_paragraph,
        }
    }
}

fn resolve_logged<'a, T: CatalogEntry>(
    catalog: &'a Catalog<T>,
    ids: &BTreeSet<String>,
    kind: &'static str,
) -> Vec<&'a T> {
    for id in ids.iter().filter(|id| !catalog.contains(id)) {
        warn!(kind, id = %id, "selected id missing from reference catalog");
    }
    catalog.resolve(ids)
}
