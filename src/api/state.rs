use std::sync::Arc;

use crate::agents::backend::AiBackend;
use crate::config::AppConfig;
use crate::riot::RiotApi;
use crate::secrets::SecretStore;
use crate::storage::ObjectStore;

/// Collaborator handles shared by the request handlers.
///
/// Everything is behind a trait object so tests can substitute fakes;
/// no handler keeps state of its own between invocations.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ObjectStore>,
    pub secrets: Arc<dyn SecretStore>,
    pub riot: Arc<dyn RiotApi>,
    pub ai: Arc<dyn AiBackend>,
}
