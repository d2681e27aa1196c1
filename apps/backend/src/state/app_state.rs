use std::sync::Arc;

use crate::rooms::RoomRegistry;
use crate::services::broadcast::Broadcaster;
use crate::services::rooms::RoomService;
use crate::ws::hub::WsHub;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    registry: Arc<RoomRegistry>,
    hub: Arc<WsHub>,
    rooms: RoomService,
}

impl AppState {
    /// Fresh registry and hub, with the hub delivering room broadcasts.
    pub fn new() -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let hub = Arc::new(WsHub::new());
        let broadcaster: Arc<dyn Broadcaster> = hub.clone();
        let rooms = RoomService::new(registry.clone(), broadcaster);
        Self {
            registry,
            hub,
            rooms,
        }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    pub fn hub(&self) -> &Arc<WsHub> {
        &self.hub
    }

    pub fn rooms(&self) -> &RoomService {
        &self.rooms
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
