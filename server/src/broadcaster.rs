use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use common::protocol::ServerEvent;
use common::{ClientId, log};

pub type ObserverSender = mpsc::Sender<ServerEvent>;

/// Fan-out list of every connected leaderboard observer. Delivery is
/// fire-and-forget: a full or closed channel costs that observer the
/// update, never the sender.
#[derive(Clone)]
pub struct Broadcaster {
    observers: Arc<Mutex<HashMap<ClientId, ObserverSender>>>,
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster").finish()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster {
    pub fn new() -> Self {
        Self {
            observers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn register(&self, client_id: ClientId, sender: ObserverSender) {
        self.observers.lock().await.insert(client_id, sender);
    }

    pub async fn unregister(&self, client_id: &ClientId) {
        self.observers.lock().await.remove(client_id);
    }

    pub async fn observer_count(&self) -> usize {
        self.observers.lock().await.len()
    }

    pub async fn broadcast_to_all(&self, event: ServerEvent) {
        let observers = self.observers.lock().await;
        for (client_id, sender) in observers.iter() {
            if let Err(e) = sender.try_send(event.clone()) {
                log!("Failed to broadcast to observer {}: {}", client_id, e);
            }
        }
    }
}
