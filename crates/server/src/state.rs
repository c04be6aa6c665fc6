use std::sync::Arc;

use reelgate_metadata::provider::MetadataProvider;
use reelgate_player::PlayerConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MetadataProvider>,
    pub player: PlayerConfig,
}
