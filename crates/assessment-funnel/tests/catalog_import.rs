use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use assessment_funnel::workflows::assessment::{
    AssessmentFunnelService, CatalogImporter, ConditionCategory, PersonalizationEngine,
    ReferenceCatalogs, TreatmentCategory,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "assessment-funnel-{name}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn write_catalogs(dir: &Path) {
    fs::write(
        dir.join("conditions.csv"),
        "id,display_name,category,group\n\
plantar-fasciitis,Plantar fasciitis,treatable,Feet\n\
lupus,Lupus,non-treatable,Systemic\n\
broken,Broken row,maybe,\n",
    )
    .expect("write conditions");
    fs::write(
        dir.join("sensations.csv"),
        "id,display_name,description\n\
stabbing,Stabbing,Sharp pain when stepping\n",
    )
    .expect("write sensations");
    fs::write(
        dir.join("treatments.csv"),
        "id,display_name,category,what_it_addressed\n\
orthotics,Custom orthotics,device,Redistributed pressure across the foot\n\
night-splint,Night splint,device,Stretched the fascia overnight\n",
    )
    .expect("write treatments");
}

#[test]
fn directory_import_feeds_personalization() {
    let dir = scratch_dir("import");
    write_catalogs(&dir);

    let catalogs = CatalogImporter::from_dir(&dir).expect("catalogs import");

    assert_eq!(catalogs.conditions.len(), 2, "unknown category row skipped");
    assert_eq!(
        catalogs.condition("lupus").map(|condition| condition.category),
        Some(ConditionCategory::NonTreatable)
    );
    assert_eq!(
        catalogs.treatment("orthotics").map(|treatment| treatment.category),
        Some(TreatmentCategory::Device)
    );

    let engine = PersonalizationEngine::new(Arc::new(catalogs));
    let mut response = AssessmentFunnelService::standard().initial_state().response;
    response
        .selected_condition_ids
        .insert("plantar-fasciitis".to_string());
    response.selected_sensation_ids.insert("stabbing".to_string());
    response.selected_treatment_ids.insert("orthotics".to_string());

    let result = engine.generate(&response);
    assert!(result.is_qualified);
    assert_eq!(result.treatment_cards.len(), 1);
    assert!(result.summary_paragraph.contains("Plantar fasciitis"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_is_reported_by_name() {
    let dir = scratch_dir("missing");
    fs::write(dir.join("conditions.csv"), "id,display_name,category,group\n")
        .expect("write conditions");

    let error = CatalogImporter::from_dir(&dir).expect_err("sensations file is missing");

    assert!(error.to_string().contains("sensations.csv"));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn standard_catalog_has_both_condition_categories() {
    let catalogs = ReferenceCatalogs::standard();

    assert!(catalogs
        .conditions
        .entries()
        .iter()
        .any(|condition| condition.is_treatable()));
    assert!(catalogs
        .conditions
        .entries()
        .iter()
        .any(|condition| !condition.is_treatable()));
}
