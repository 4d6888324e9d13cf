use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::backend::proxy::BackendProxy;
use crate::infrastructure::storage::ObjectStore;
use crate::modules::analysis::repository::AnalysisRepository;
use crate::modules::auth::repository::UserRepository;
use crate::modules::transcode::repository::TranscodeRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub users: Arc<dyn UserRepository>,
    pub analyses: Arc<dyn AnalysisRepository>,
    pub transcodes: Arc<dyn TranscodeRepository>,
    pub storage: Arc<dyn ObjectStore>,
    pub backends: BackendProxy,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        analyses: Arc<dyn AnalysisRepository>,
        transcodes: Arc<dyn TranscodeRepository>,
        storage: Arc<dyn ObjectStore>,
        backends: BackendProxy,
    ) -> Self {
        Self {
            config,
            users,
            analyses,
            transcodes,
            storage,
            backends,
        }
    }
}
