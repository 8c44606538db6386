use crate::config::Config;
use crate::ingest::fetch::JobPageFetcher;
use crate::llm_client::SharedModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no API key is configured; every analyzer then runs its rules.
    pub llm: Option<SharedModel>,
    pub fetcher: JobPageFetcher,
}

impl AppState {
    /// Name reported by `/health` for the active generation engine.
    pub fn ai_service(&self) -> &str {
        self.llm.as_ref().map_or("template", |llm| llm.name())
    }
}
