//! Read-only reference tables the funnel resolves selected ids against.

mod importer;
mod standard;

pub use importer::{CatalogImportError, CatalogImporter};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionCategory {
    Treatable,
    NonTreatable,
}

impl ConditionCategory {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "treatable" => Some(Self::Treatable),
            "non-treatable" | "non_treatable" | "nontreatable" => Some(Self::NonTreatable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: String,
    pub display_name: String,
    pub category: ConditionCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Condition {
    pub fn is_treatable(&self) -> bool {
        self.category == ConditionCategory::Treatable
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensation {
    pub id: String,
    pub display_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreatmentCategory {
    Medication,
    Procedure,
    Device,
    Therapy,
    MindBody,
}

impl TreatmentCategory {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "medication" => Some(Self::Medication),
            "procedure" => Some(Self::Procedure),
            "device" => Some(Self::Device),
            "therapy" => Some(Self::Therapy),
            "mindbody" | "mind-body" | "mind_body" => Some(Self::MindBody),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Medication => "Medication",
            Self::Procedure => "Procedure",
            Self::Device => "Device",
            Self::Therapy => "Therapy",
            Self::MindBody => "Mind-body",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: String,
    pub display_name: String,
    pub category: TreatmentCategory,
    pub what_it_addressed: String,
}

/// Anything stored in a [`Catalog`] is keyed by a unique id.
pub trait CatalogEntry {
    fn id(&self) -> &str;
}

impl CatalogEntry for Condition {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for Sensation {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for Treatment {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered lookup table. Iteration follows declaration order; the first entry wins on
/// duplicate ids.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new(entries: Vec<T>) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for entry in entries {
            if index.contains_key(entry.id()) {
                warn!(id = entry.id(), "duplicate catalog id ignored");
                continue;
            }
            index.insert(entry.id().to_string(), kept.len());
            kept.push(entry);
        }

        Self {
            entries: kept,
            index,
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|position| &self.entries[*position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose id is in `ids`, in catalog order. Unknown ids are skipped.
    pub fn resolve<'a, I>(&self, ids: I) -> Vec<&T>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut positions: Vec<usize> = ids
            .into_iter()
            .filter_map(|id| self.index.get(id.as_str()).copied())
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
            .into_iter()
            .map(|position| &self.entries[position])
            .collect()
    }
}

/// The three reference tables supplied to the funnel.
#[derive(Debug, Clone)]
pub struct ReferenceCatalogs {
    pub conditions: Catalog<Condition>,
    pub sensations: Catalog<Sensation>,
    pub treatments: Catalog<Treatment>,
}

impl ReferenceCatalogs {
    pub fn new(
        conditions: Vec<Condition>,
        sensations: Vec<Sensation>,
        treatments: Vec<Treatment>,
    ) -> Self {
        Self {
            conditions: Catalog::new(conditions),
            sensations: Catalog::new(sensations),
            treatments: Catalog::new(treatments),
        }
    }

    /// Built-in tables used when no catalog directory is configured.
    pub fn standard() -> Self {
        Self::new(
            standard::conditions(),
            standard::sensations(),
            standard::treatments(),
        )
    }

    pub fn condition(&self, id: &str) -> Option<&Condition> {
        self.conditions.get(id)
    }

    pub fn sensation(&self, id: &str) -> Option<&Sensation> {
        self.sensations.get(id)
    }

    pub fn treatment(&self, id: &str) -> Option<&Treatment> {
        self.treatments.get(id)
    }

    /// Condition groups in first-seen order, each with its conditions, for grouped pickers.
    pub fn condition_groups(&self) -> Vec<(Option<&str>, Vec<&Condition>)> {
        let mut groups: Vec<(Option<&str>, Vec<&Condition>)> = Vec::new();
        for condition in self.conditions.entries() {
            let key = condition.group.as_deref();
            match groups.iter_mut().find(|(group, _)| *group == key) {
                Some((_, members)) => members.push(condition),
                None => groups.push((key, vec![condition])),
            }
        }
        groups
    }
}
