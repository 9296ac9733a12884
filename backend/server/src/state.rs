use std::sync::Arc;

use common::{RegistrationClient, RemoteClient};

use super::{config::Config, error::AppError, layout::Layout, session::SessionStore};

pub struct AppState {
    pub config: Config,
    pub layout: Layout,
    pub sessions: SessionStore,
    pub client: Arc<dyn RegistrationClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let client = RemoteClient::new(
            &config.rpc_url,
            config.rpc_timeout,
            config.rpc_token.clone(),
        )?;

        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: Config, client: Arc<dyn RegistrationClient>) -> Arc<Self> {
        Arc::new(Self {
            sessions: SessionStore::new(config.session_ttl),
            layout: Layout::new(),
            config,
            client,
        })
    }
}
