use std::sync::Arc;

use crate::{
    config::EnrichmentMode,
    db::GraphStore,
    services::{providers::MetadataSource, DiscoveryService, ImportService},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MetadataSource>,
    pub import: Arc<ImportService>,
    pub discovery: Arc<DiscoveryService>,
}

impl AppState {
    /// Wires the import pipeline and the discovery engine onto one
    /// catalog provider and one graph store.
    pub fn new(
        source: Arc<dyn MetadataSource>,
        store: Arc<dyn GraphStore>,
        enrichment: EnrichmentMode,
    ) -> Self {
        let import = Arc::new(ImportService::new(source.clone(), store.clone()));
        let discovery = Arc::new(DiscoveryService::new(
            source.clone(),
            store,
            enrichment,
        ));

        Self {
            source,
            import,
            discovery,
        }
    }
}
