use super::domain::{AssessmentResponse, StepId};
use serde::Serialize;

/// Which single-choice answer a step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceField {
    ActivityImpact,
    Urgency,
}

/// Step category. Validation and navigation dispatch on this, never on step keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "field")]
pub enum StepKind {
    PainProfile,
    ConditionSelection,
    SensationSelection,
    TreatmentHistory,
    SingleChoice(ChoiceField),
    BudgetDecision,
    BudgetRange,
    Goals,
    Contact,
    Results,
    WaitingList,
}

impl StepKind {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Results | Self::WaitingList)
    }

    /// Whether the step belongs to the path implied by the stored answers.
    pub fn is_included(self, response: &AssessmentResponse) -> bool {
        match self {
            Self::BudgetRange => response.has_budget == Some(true),
            Self::WaitingList => false,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTemplate {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: StepKind,
}

impl StepTemplate {
    pub fn id(&self) -> StepId {
        StepId::from(self.key)
    }
}

/// Ordered step sequence plus the off-path waiting-list step.
#[derive(Debug, Clone)]
pub struct FunnelBlueprint {
    steps: Vec<StepTemplate>,
    waiting_list: StepTemplate,
}

impl FunnelBlueprint {
    pub fn standard() -> Self {
        Self {
            steps: standard_step_templates(),
            waiting_list: StepTemplate {
                key: "waiting-list",
                title: "Join the waiting list",
                kind: StepKind::WaitingList,
            },
        }
    }

    pub fn steps(&self) -> &[StepTemplate] {
        &self.steps
    }

    pub fn first_step(&self) -> StepId {
        self.steps
            .first()
            .map(StepTemplate::id)
            .unwrap_or_else(|| self.waiting_list.id())
    }

    pub fn waiting_list_step(&self) -> StepId {
        self.waiting_list.id()
    }

    pub fn position(&self, step: &StepId) -> Option<usize> {
        self.steps
            .iter()
            .position(|template| template.key == step.as_str())
    }

    pub fn template(&self, step: &StepId) -> Option<&StepTemplate> {
        if self.waiting_list.key == step.as_str() {
            return Some(&self.waiting_list);
        }
        self.steps
            .iter()
            .find(|template| template.key == step.as_str())
    }

    pub fn kind_of(&self, step: &StepId) -> Option<StepKind> {
        self.template(step).map(|template| template.kind)
    }

    pub fn is_terminal(&self, step: &StepId) -> bool {
        self.kind_of(step).is_some_and(StepKind::is_terminal)
    }

    pub fn first_of_kind(&self, kind: StepKind) -> Option<&StepTemplate> {
        self.steps.iter().find(|template| template.kind == kind)
    }
}

fn standard_step_templates() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            key: "pain-profile",
            title: "How long have you been living with pain?",
            kind: StepKind::PainProfile,
        },
        StepTemplate {
            key: "conditions",
            title: "Which conditions have you been diagnosed with?",
            kind: StepKind::ConditionSelection,
        },
        StepTemplate {
            key: "sensations",
            title: "How would you describe the pain?",
            kind: StepKind::SensationSelection,
        },
        StepTemplate {
            key: "treatments",
            title: "What have you already tried?",
            kind: StepKind::TreatmentHistory,
        },
        StepTemplate {
            key: "activity-impact",
            title: "How much does the pain limit your daily life?",
            kind: StepKind::SingleChoice(ChoiceField::ActivityImpact),
        },
        StepTemplate {
            key: "urgency",
            title: "How soon do you want relief?",
            kind: StepKind::SingleChoice(ChoiceField::Urgency),
        },
        StepTemplate {
            key: "budget",
            title: "Have you set aside a budget for treatment?",
            kind: StepKind::BudgetDecision,
        },
        StepTemplate {
            key: "budget-range",
            title: "Which range fits your budget?",
            kind: StepKind::BudgetRange,
        },
        StepTemplate {
            key: "goals",
            title: "What would you do with less pain?",
            kind: StepKind::Goals,
        },
        StepTemplate {
            key: "contact",
            title: "Where should we send your results?",
            kind: StepKind::Contact,
        },
        StepTemplate {
            key: "results",
            title: "Your personalized results",
            kind: StepKind::Results,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_blueprint_orders_branch_points() {
        let blueprint = FunnelBlueprint::standard();

        assert_eq!(blueprint.first_step(), StepId::from("pain-profile"));
        let budget = blueprint
            .position(&StepId::from("budget"))
            .expect("budget step present");
        assert_eq!(
            blueprint.steps()[budget + 1].kind,
            StepKind::BudgetRange,
            "budget range follows the budget decision"
        );
        assert_eq!(
            blueprint.steps().last().map(|template| template.kind),
            Some(StepKind::Results)
        );
    }

    #[test]
    fn waiting_list_is_terminal_but_off_the_linear_path() {
        let blueprint = FunnelBlueprint::standard();
        let waiting = blueprint.waiting_list_step();

        assert!(blueprint.is_terminal(&waiting));
        assert_eq!(blueprint.position(&waiting), None);
        assert_eq!(blueprint.kind_of(&waiting), Some(StepKind::WaitingList));
        assert!(!blueprint.is_terminal(&StepId::from("nonexistent")));
    }
}
