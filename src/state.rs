use crate::auth::SessionService;
use crate::backend::BackendClient;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub sessions: SessionService,
    pub config: Config,
}

impl AppState {
    pub fn new(backend: BackendClient, config: Config) -> Self {
        let sessions = SessionService::new(config.auth.session_hours);
        Self {
            backend,
            sessions,
            config,
        }
    }
}
