use std::sync::Arc;
use anyhow::Context;
use tracing::{info, warn};
use crate::models::session::SearchSession;
use crate::repositories::blob_store::BlobStore;

pub const RESTAURANT_DATA_KEY: &str = "restaurantData";

/// Passes the latest search result from the search step to the selection step.
pub struct SessionHandoff {
    store: Arc<dyn BlobStore>,
}

impl SessionHandoff {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Overwrites whatever session was stored before.
    pub fn save_session(&self, session: &SearchSession) -> anyhow::Result<()> {
        let blob = serde_json::to_string(session).context("Failed to serialize search session")?;
        self.store.set(RESTAURANT_DATA_KEY, &blob)?;
        info!("Stored search session with {} restaurants", session.candidates.len());
        Ok(())
    }

    /// A missing or unreadable blob both read as "no session".
    pub fn load_session(&self) -> Option<SearchSession> {
        let blob = match self.store.get(RESTAURANT_DATA_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read stored search session due to: {:#}", e);
                return None;
            }
        };

        match serde_json::from_str::<SearchSession>(&blob) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Error parsing restaurant data: {}", e);
                None
            }
        }
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.store.remove(RESTAURANT_DATA_KEY)
    }
}
