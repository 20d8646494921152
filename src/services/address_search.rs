use std::sync::{Arc, Mutex};
use std::time::Duration;
use futures::FutureExt;
use tracing::warn;
use crate::helpers::debouncer::{Debouncer, DEFAULT_DEBOUNCE};
use crate::models::prediction::Prediction;
use crate::repositories::places_gateway::{PlacesGateway, MIN_AUTOCOMPLETE_INPUT};

pub fn new_session_token() -> String {
    nanoid::nanoid!(26)
}

/// Debounced address autocomplete. Only the last input inside the debounce
/// window reaches the gateway.
pub struct AddressSearch {
    debouncer: Debouncer,
    predictions: Arc<Mutex<Vec<Prediction>>>,
    session_token: Arc<Mutex<String>>,
}

impl AddressSearch {
    pub fn new(gateway: Arc<PlacesGateway>) -> Self {
        Self::with_delay(gateway, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(gateway: Arc<PlacesGateway>, delay: Duration) -> Self {
        let predictions = Arc::new(Mutex::new(Vec::new()));
        let session_token = Arc::new(Mutex::new(new_session_token()));

        let debouncer = {
            let predictions = predictions.clone();
            let session_token = session_token.clone();
            Debouncer::new(delay, move |text: String| {
                let gateway = gateway.clone();
                let predictions = predictions.clone();
                let token = lock(&session_token).clone();
                async move {
                    let found = match gateway.autocomplete(&text, &token).await {
                        Ok(found) => found,
                        Err(e) => {
                            warn!("Error fetching predictions: {}", e);
                            Vec::new()
                        }
                    };
                    *lock(&predictions) = found;
                }
                .boxed()
            })
        };

        Self {
            debouncer,
            predictions,
            session_token,
        }
    }

    pub fn on_input(&mut self, text: &str) {
        if text.trim().chars().count() < MIN_AUTOCOMPLETE_INPUT {
            self.debouncer.cancel_pending();
            lock(&self.predictions).clear();
            return;
        }
        self.debouncer.schedule(text.to_string());
    }

    pub fn predictions(&self) -> Vec<Prediction> {
        lock(&self.predictions).clone()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn session_token(&self) -> String {
        lock(&self.session_token).clone()
    }

    /// Ends the billable autocomplete session after a place was picked.
    pub fn finish(&mut self) {
        self.debouncer.cancel_pending();
        lock(&self.predictions).clear();
        *lock(&self.session_token) = new_session_token();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
