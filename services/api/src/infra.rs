use assessment_funnel::config::FunnelConfig;
use assessment_funnel::error::AppError;
use assessment_funnel::workflows::assessment::{
    AssessmentFunnelService, CatalogImporter, FunnelAction, ReferenceCatalogs,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalogs from `catalog_dir` when configured, otherwise the built-in tables.
pub(crate) fn load_catalogs(config: &FunnelConfig) -> Result<ReferenceCatalogs, AppError> {
    match &config.catalog_dir {
        Some(dir) => Ok(CatalogImporter::from_dir(dir)?),
        None => {
            info!("no catalog directory configured; using built-in reference catalogs");
            Ok(ReferenceCatalogs::standard())
        }
    }
}

pub(crate) fn build_service(config: &FunnelConfig) -> Result<Arc<AssessmentFunnelService>, AppError> {
    let catalogs = load_catalogs(config)?;
    Ok(Arc::new(AssessmentFunnelService::new(
        Arc::new(catalogs),
        config,
    )))
}

/// Scripted answers: a JSON array of funnel actions.
pub(crate) fn read_actions(path: &Path) -> Result<Vec<FunnelAction>, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
