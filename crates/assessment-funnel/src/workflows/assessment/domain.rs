use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Identifier of one question screen in the funnel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub String);

impl StepId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationStatus {
    Pending,
    Qualified,
    Disqualified,
}

impl QualificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Qualified => "qualified",
            Self::Disqualified => "disqualified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyLevel {
    Immediate,
    WithinMonth,
    FewMonths,
    JustExploring,
}

impl UrgencyLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediate => "As soon as possible",
            Self::WithinMonth => "Within the next month",
            Self::FewMonths => "In the next few months",
            Self::JustExploring => "Just exploring options",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under-5k")]
    Under5k,
    #[serde(rename = "5k-15k")]
    From5kTo15k,
    #[serde(rename = "15k-30k")]
    From15kTo30k,
    #[serde(rename = "over-30k")]
    Over30k,
}

impl BudgetRange {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under5k => "Under $5,000",
            Self::From5kTo15k => "$5,000 - $15,000",
            Self::From15kTo30k => "$15,000 - $30,000",
            Self::Over30k => "Over $30,000",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityImpact {
    Minimal,
    Moderate,
    Significant,
    Severe,
}

impl ActivityImpact {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Moderate => "Moderate",
            Self::Significant => "Significant",
            Self::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PainDuration {
    #[serde(rename = "3-6-months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12-months")]
    SixToTwelveMonths,
    #[serde(rename = "1-3-years")]
    OneToThreeYears,
    #[serde(rename = "over-3-years")]
    OverThreeYears,
}

impl PainDuration {
    /// Phrase completing "It has been with you ...".
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::ThreeToSixMonths => "for three to six months",
            Self::SixToTwelveMonths => "for six months to a year",
            Self::OneToThreeYears => "for one to three years",
            Self::OverThreeYears => "for more than three years",
        }
    }
}

/// The single mutable aggregate collected across the funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub assessment_id: Uuid,

    pub has_qualifying_pain_duration: Option<bool>,
    pub age_range: Option<String>,
    pub pain_duration: Option<PainDuration>,
    pub pain_intensity: Option<u8>,

    pub selected_condition_ids: BTreeSet<String>,
    pub free_text_other_condition: String,
    pub selected_sensation_ids: BTreeSet<String>,
    pub selected_treatment_ids: BTreeSet<String>,
    pub free_text_other_treatment: String,

    pub urgency_level: Option<UrgencyLevel>,
    pub has_budget: Option<bool>,
    pub budget_range: Option<BudgetRange>,
    pub activity_impact: Option<ActivityImpact>,
    pub goals_text: String,

    pub name: String,
    pub email: String,
    pub phone: String,

    pub current_step_id: StepId,
    pub total_steps: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub qualification_status: QualificationStatus,
    pub disqualification_reason: Option<String>,
}

impl AssessmentResponse {
    pub fn new(first_step: StepId, total_steps: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            assessment_id: Uuid::new_v4(),
            has_qualifying_pain_duration: None,
            age_range: None,
            pain_duration: None,
            pain_intensity: None,
            selected_condition_ids: BTreeSet::new(),
            free_text_other_condition: String::new(),
            selected_sensation_ids: BTreeSet::new(),
            selected_treatment_ids: BTreeSet::new(),
            free_text_other_treatment: String::new(),
            urgency_level: None,
            has_budget: None,
            budget_range: None,
            activity_impact: None,
            goals_text: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            current_step_id: first_step,
            total_steps,
            started_at,
            completed_at: None,
            qualification_status: QualificationStatus::Pending,
            disqualification_reason: None,
        }
    }

    /// Narrative phrase for how long the pain has lasted, when known.
    pub fn duration_phrase(&self) -> Option<&'static str> {
        match (self.pain_duration, self.has_qualifying_pain_duration) {
            (Some(duration), _) => Some(duration.phrase()),
            (None, Some(true)) => Some("for more than three months"),
            _ => None,
        }
    }

    /// Merge a patch; keys absent from the patch keep their current value.
    pub fn apply_patch(&mut self, patch: ResponsePatch) {
        let ResponsePatch {
            has_qualifying_pain_duration,
            age_range,
            pain_duration,
            pain_intensity,
            selected_condition_ids,
            free_text_other_condition,
            selected_sensation_ids,
            selected_treatment_ids,
            free_text_other_treatment,
            urgency_level,
            has_budget,
            budget_range,
            activity_impact,
            goals_text,
            name,
            email,
            phone,
        } = patch;

        merge(
            &mut self.has_qualifying_pain_duration,
            has_qualifying_pain_duration,
        );
        merge(&mut self.age_range, age_range);
        merge(&mut self.pain_duration, pain_duration);
        merge(&mut self.pain_intensity, pain_intensity);
        merge(&mut self.selected_condition_ids, selected_condition_ids);
        merge(&mut self.free_text_other_condition, free_text_other_condition);
        merge(&mut self.selected_sensation_ids, selected_sensation_ids);
        merge(&mut self.selected_treatment_ids, selected_treatment_ids);
        merge(&mut self.free_text_other_treatment, free_text_other_treatment);
        merge(&mut self.urgency_level, urgency_level);
        merge(&mut self.has_budget, has_budget);
        merge(&mut self.budget_range, budget_range);
        merge(&mut self.activity_impact, activity_impact);
        merge(&mut self.goals_text, goals_text);
        merge(&mut self.name, name);
        merge(&mut self.email, email);
        merge(&mut self.phone, phone);
    }
}

fn merge<T>(slot: &mut T, incoming: Option<T>) {
    if let Some(value) = incoming {
        *slot = value;
    }
}

/// Partial update of the answer fields.
///
/// Nullable answers use `Option<Option<T>>`: an absent key leaves the field alone,
/// while an explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsePatch {
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_qualifying_pain_duration: Option<Option<bool>>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub age_range: Option<Option<String>>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub pain_duration: Option<Option<PainDuration>>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub pain_intensity: Option<Option<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_condition_ids: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text_other_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_sensation_ids: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_treatment_ids: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text_other_treatment: Option<String>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub urgency_level: Option<Option<UrgencyLevel>>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_budget: Option<Option<bool>>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget_range: Option<Option<BudgetRange>>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_impact: Option<Option<ActivityImpact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn id_set<I, S>(ids: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Into::into).collect()
}

impl ResponsePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn pain_profile(has_qualifying_duration: bool, duration: Option<PainDuration>) -> Self {
        Self {
            has_qualifying_pain_duration: Some(Some(has_qualifying_duration)),
            pain_duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn conditions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_condition_ids: Some(id_set(ids)),
            ..Self::default()
        }
    }

    pub fn sensations<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_sensation_ids: Some(id_set(ids)),
            ..Self::default()
        }
    }

    pub fn treatments<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_treatment_ids: Some(id_set(ids)),
            ..Self::default()
        }
    }

    pub fn urgency(level: UrgencyLevel) -> Self {
        Self {
            urgency_level: Some(Some(level)),
            ..Self::default()
        }
    }

    pub fn activity_impact(impact: ActivityImpact) -> Self {
        Self {
            activity_impact: Some(Some(impact)),
            ..Self::default()
        }
    }

    pub fn budget(has_budget: bool) -> Self {
        Self {
            has_budget: Some(Some(has_budget)),
            ..Self::default()
        }
    }

    pub fn budget_range(range: BudgetRange) -> Self {
        Self {
            budget_range: Some(Some(range)),
            ..Self::default()
        }
    }

    pub fn goals(text: impl Into<String>) -> Self {
        Self {
            goals_text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn contact(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            ..Self::default()
        }
    }
}
