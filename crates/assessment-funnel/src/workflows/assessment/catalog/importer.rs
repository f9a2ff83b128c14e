use super::{
    Condition, ConditionCategory, ReferenceCatalogs, Sensation, Treatment, TreatmentCategory,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub const CONDITIONS_FILE: &str = "conditions.csv";
pub const SENSATIONS_FILE: &str = "sensations.csv";
pub const TREATMENTS_FILE: &str = "treatments.csv";

#[derive(Debug)]
pub enum CatalogImportError {
    Io {
        file: String,
        source: std::io::Error,
    },
    Csv {
        file: String,
        source: csv::Error,
    },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io { file, source } => {
                write!(f, "failed to read catalog file {}: {}", file, source)
            }
            CatalogImportError::Csv { file, source } => {
                write!(f, "catalog file {} has an unreadable header: {}", file, source)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io { source, .. } => Some(source),
            CatalogImportError::Csv { source, .. } => Some(source),
        }
    }
}

/// Loads the reference tables from CSV exports. Bad rows are skipped, not fatal.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<ReferenceCatalogs, CatalogImportError> {
        let dir = dir.as_ref();
        let open = |name: &str| {
            std::fs::File::open(dir.join(name)).map_err(|source| CatalogImportError::Io {
                file: name.to_string(),
                source,
            })
        };

        let conditions = Self::conditions_from_reader(open(CONDITIONS_FILE)?)?;
        let sensations = Self::sensations_from_reader(open(SENSATIONS_FILE)?)?;
        let treatments = Self::treatments_from_reader(open(TREATMENTS_FILE)?)?;

        info!(
            conditions = conditions.len(),
            sensations = sensations.len(),
            treatments = treatments.len(),
            dir = %dir.display(),
            "reference catalogs imported"
        );

        Ok(ReferenceCatalogs::new(conditions, sensations, treatments))
    }

    pub fn conditions_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<Condition>, CatalogImportError> {
        read_rows::<_, ConditionRow>(reader, CONDITIONS_FILE).map(|rows| {
            rows.into_iter()
                .filter_map(|(line, row)| row.into_condition(line))
                .collect()
        })
    }

    pub fn sensations_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<Sensation>, CatalogImportError> {
        read_rows::<_, SensationRow>(reader, SENSATIONS_FILE).map(|rows| {
            rows.into_iter()
                .filter_map(|(line, row)| row.into_sensation(line))
                .collect()
        })
    }

    pub fn treatments_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<Treatment>, CatalogImportError> {
        read_rows::<_, TreatmentRow>(reader, TREATMENTS_FILE).map(|rows| {
            rows.into_iter()
                .filter_map(|(line, row)| row.into_treatment(line))
                .collect()
        })
    }
}

fn read_rows<R: Read, T: DeserializeOwned>(
    reader: R,
    file: &str,
) -> Result<Vec<(u64, T)>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    csv_reader
        .headers()
        .map_err(|source| CatalogImportError::Csv {
            file: file.to_string(),
            source,
        })?;

    let mut rows = Vec::new();
    for (offset, record) in csv_reader.deserialize::<T>().enumerate() {
        // Header is line 1.
        let line = offset as u64 + 2;
        match record {
            Ok(row) => rows.push((line, row)),
            Err(err) => warn!(file, line, error = %err, "skipping malformed catalog row"),
        }
    }

    Ok(rows)
}

fn required(value: String, field: &'static str, file: &'static str, line: u64) -> Option<String> {
    if value.trim().is_empty() {
        warn!(file, line, field, "skipping catalog row with empty field");
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Deserialize)]
struct ConditionRow {
    id: String,
    display_name: String,
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    group: Option<String>,
}

impl ConditionRow {
    fn into_condition(self, line: u64) -> Option<Condition> {
        let id = required(self.id, "id", CONDITIONS_FILE, line)?;
        let display_name = required(self.display_name, "display_name", CONDITIONS_FILE, line)?;
        let Some(category) = ConditionCategory::parse(&self.category) else {
            warn!(
                file = CONDITIONS_FILE,
                line,
                category = %self.category,
                "skipping condition with unknown category"
            );
            return None;
        };

        Some(Condition {
            id,
            display_name,
            category,
            group: self.group,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SensationRow {
    id: String,
    display_name: String,
    #[serde(default)]
    description: String,
}

impl SensationRow {
    fn into_sensation(self, line: u64) -> Option<Sensation> {
        Some(Sensation {
            id: required(self.id, "id", SENSATIONS_FILE, line)?,
            display_name: required(self.display_name, "display_name", SENSATIONS_FILE, line)?,
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TreatmentRow {
    id: String,
    display_name: String,
    category: String,
    what_it_addressed: String,
}

impl TreatmentRow {
    fn into_treatment(self, line: u64) -> Option<Treatment> {
        let id = required(self.id, "id", TREATMENTS_FILE, line)?;
        let display_name = required(self.display_name, "display_name", TREATMENTS_FILE, line)?;
        let what_it_addressed = required(
            self.what_it_addressed,
            "what_it_addressed",
            TREATMENTS_FILE,
            line,
        )?;
        let Some(category) = TreatmentCategory::parse(&self.category) else {
            warn!(
                file = TREATMENTS_FILE,
                line,
                category = %self.category,
                "skipping treatment with unknown category"
            );
            return None;
        };

        Some(Treatment {
            id,
            display_name,
            category,
            what_it_addressed,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
