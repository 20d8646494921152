use std::sync::Arc;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::error::AppError;
use crate::models::filter::{FilterCriteria, ALL_CUISINES, CUISINES};
use crate::models::prediction::Prediction;
use crate::models::restaurant::Location;
use crate::repositories::blob_store::BlobStore;
use crate::repositories::places_gateway::PlacesGateway;

pub const RESTAURANT_FILTERS_KEY: &str = "restaurantFilters";

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct PersistedFilters {
    criteria: FilterCriteria,
    address: Option<String>,
    use_current_location: bool,
}

/// The criteria being edited plus the address-picker fields around them.
///
/// When attached to a store every change is written back, but only after
/// [`FilterState::load`] has run. Until then writes are suppressed so the
/// defaults never clobber what a previous run stored.
#[derive(Default)]
pub struct FilterState {
    criteria: FilterCriteria,
    address: Option<String>,
    use_current_location: bool,
    pending_address: String,
    suggestions: Vec<Prediction>,
    store: Option<Arc<dyn BlobStore>>,
    loaded: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn uses_current_location(&self) -> bool {
        self.use_current_location
    }

    pub fn pending_address(&self) -> &str {
        &self.pending_address
    }

    pub fn suggestions(&self) -> &[Prediction] {
        &self.suggestions
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn toggle_cuisine(&mut self, name: &str) {
        let selected = &mut self.criteria.selected_cuisines;
        let all_active = selected.iter().any(|c| c == ALL_CUISINES);

        if name == ALL_CUISINES {
            if all_active {
                selected.clear();
            } else {
                *selected = CUISINES.iter().map(|c| c.to_string()).collect();
            }
        } else if all_active {
            *selected = vec![name.to_string()];
        } else {
            toggle(selected, name);
        }

        self.persist();
    }

    pub fn toggle_dietary_restriction(&mut self, name: &str) {
        toggle(&mut self.criteria.selected_dietary_restrictions, name);
        self.persist();
    }

    pub fn set_location_from_coordinates(&mut self, lat: f64, lng: f64) -> Result<(), AppError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::validation("location", "Coordinates are out of range"));
        }

        self.criteria.origin_coordinates = Some(Location::new(lat, lng));
        self.use_current_location = true;
        self.address = None;
        self.clear_address_search();
        self.persist();
        Ok(())
    }

    /// Resolves the place's coordinates through the gateway before storing them.
    pub async fn set_location_from_place(
        &mut self,
        gateway: &PlacesGateway,
        place_id: &str,
    ) -> Result<(), AppError> {
        let detail = gateway.get_details(place_id).await?;
        let geometry = detail.geometry.ok_or_else(|| {
            AppError::validation("location", "Selected place has no coordinates")
        })?;

        info!("Location set from place {}", place_id);
        self.criteria.origin_coordinates = Some(geometry.location);
        self.use_current_location = false;
        self.address = detail.formatted_address.or(Some(detail.name));
        self.clear_address_search();
        self.persist();
        Ok(())
    }

    pub fn clear_location(&mut self) {
        self.criteria.origin_coordinates = None;
        self.use_current_location = false;
        self.address = None;
        self.persist();
    }

    pub fn set_radius_km(&mut self, radius_km: f64) -> Result<(), AppError> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(AppError::validation("radius", "Radius must be zero or more kilometers"));
        }
        self.criteria.radius_km = radius_km;
        self.persist();
        Ok(())
    }

    pub fn set_price_level(&mut self, price_level: u8) -> Result<(), AppError> {
        if !(1..=4).contains(&price_level) {
            return Err(AppError::validation("priceLevel", "Price level must be between 1 and 4"));
        }
        self.criteria.price_level = price_level;
        self.persist();
        Ok(())
    }

    pub fn set_min_rating(&mut self, min_rating: f64) -> Result<(), AppError> {
        if !(0.0..=5.0).contains(&min_rating) {
            return Err(AppError::validation("minRating", "Minimum rating must be between 0 and 5"));
        }
        self.criteria.min_rating = min_rating;
        self.persist();
        Ok(())
    }

    pub fn set_pending_address(&mut self, text: &str) {
        self.pending_address = text.to_string();
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<Prediction>) {
        self.suggestions = suggestions;
    }

    fn clear_address_search(&mut self) {
        self.pending_address.clear();
        self.suggestions.clear();
    }

    pub fn validate_for_search(&self) -> Result<(), AppError> {
        if self.criteria.selected_cuisines.is_empty() {
            return Err(AppError::validation("cuisine", "Please select at least one cuisine"));
        }
        if self.criteria.origin_coordinates.is_none() {
            return Err(AppError::validation("location", "Please choose a location"));
        }
        Ok(())
    }

    /// Replaces the in-memory criteria with whatever the store holds and
    /// enables write-back. An unreadable blob keeps the defaults.
    pub fn load(&mut self) -> anyhow::Result<()> {
        let Some(store) = self.store.clone() else {
            self.loaded = true;
            return Ok(());
        };

        let blob = store
            .get(RESTAURANT_FILTERS_KEY)
            .context("Failed to read stored filters")?;

        if let Some(blob) = blob {
            match serde_json::from_str::<PersistedFilters>(&blob) {
                Ok(persisted) => {
                    self.criteria = persisted.criteria;
                    self.address = persisted.address;
                    self.use_current_location = persisted.use_current_location;
                    debug!("Restored stored filters");
                }
                Err(e) => warn!("Ignoring unreadable stored filters: {}", e),
            }
        }

        self.loaded = true;
        Ok(())
    }

    fn persist(&self) {
        let Some(store) = &self.store else { return };
        if !self.loaded {
            debug!("Filters not loaded yet, skipping save");
            return;
        }

        let persisted = PersistedFilters {
            criteria: self.criteria.clone(),
            address: self.address.clone(),
            use_current_location: self.use_current_location,
        };

        let result = serde_json::to_string(&persisted)
            .context("Failed to serialize filters")
            .and_then(|blob| store.set(RESTAURANT_FILTERS_KEY, &blob));
        if let Err(e) = result {
            warn!("Failed to save filters due to: {:#}", e);
        }
    }
}

fn toggle(selected: &mut Vec<String>, name: &str) {
    if let Some(index) = selected.iter().position(|s| s == name) {
        selected.remove(index);
    } else {
        selected.push(name.to_string());
    }
}
