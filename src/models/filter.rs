use serde::{Deserialize, Serialize};
use crate::models::restaurant::Location;

pub const ALL_CUISINES: &str = "All";

pub const CUISINES: [&str; 23] = [
    ALL_CUISINES,
    "Chinese",
    "Japanese",
    "Korean",
    "Vietnamese",
    "Thai",
    "Indian",
    "Turkish",
    "Lebanese",
    "Israeli",
    "Greek",
    "Italian",
    "Spanish",
    "Portuguese",
    "French",
    "Mexican",
    "Peruvian",
    "Brazilian",
    "Argentinian",
    "Caribbean",
    "German",
    "Russian",
    "African",
];

pub const DIETARY_RESTRICTIONS: [&str; 8] = [
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Dairy-Free",
    "Nut-Free",
    "Halal",
    "Kosher",
    "Pescatarian",
];

pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_PRICE_LEVEL: u8 = 1;
pub const DEFAULT_MIN_RATING: f64 = 3.0;

/// Upstream nearby search rejects anything wider than this.
pub const MAX_RADIUS_METERS: u64 = 50_000;

/// The user's search criteria. Selections keep the order they were made in.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub origin_coordinates: Option<Location>,
    pub radius_km: f64,
    pub selected_cuisines: Vec<String>,
    pub selected_dietary_restrictions: Vec<String>,
    pub price_level: u8,
    pub min_rating: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            origin_coordinates: None,
            radius_km: DEFAULT_RADIUS_KM,
            selected_cuisines: Vec::new(),
            selected_dietary_restrictions: Vec::new(),
            price_level: DEFAULT_PRICE_LEVEL,
            min_rating: DEFAULT_MIN_RATING,
        }
    }
}

impl FilterCriteria {
    /// Builds the upstream request. `None` while no origin is known.
    pub fn to_nearby_search(&self) -> Option<NearbySearch> {
        let origin = self.origin_coordinates?;

        Some(NearbySearch {
            origin,
            radius_km: self.radius_km,
            cuisine_terms: self.selected_cuisines.clone(),
            price_level: Some(self.price_level),
            dietary_terms: self.selected_dietary_restrictions.clone(),
            page_token: None,
        })
    }
}

/// A nearby-search request against the places provider.
#[derive(Clone, Debug, PartialEq)]
pub struct NearbySearch {
    pub origin: Location,
    pub radius_km: f64,
    pub cuisine_terms: Vec<String>,
    pub price_level: Option<u8>,
    pub dietary_terms: Vec<String>,
    pub page_token: Option<String>,
}

impl NearbySearch {
    pub fn new(origin: Location) -> Self {
        Self {
            origin,
            radius_km: DEFAULT_RADIUS_KM,
            cuisine_terms: Vec::new(),
            price_level: None,
            dietary_terms: Vec::new(),
            page_token: None,
        }
    }

    /// A zero or negative radius falls back to the default distance.
    pub fn radius_meters(&self) -> u64 {
        let radius_km = if self.radius_km > 0.0 {
            self.radius_km
        } else {
            DEFAULT_RADIUS_KM
        };
        ((radius_km * 1000.0).round() as u64).min(MAX_RADIUS_METERS)
    }

    /// Cuisine terms followed by dietary terms, joined with " OR ".
    /// A cuisine selection containing "All" contributes nothing.
    pub fn keyword(&self) -> Option<String> {
        let cuisine_terms: &[String] = if self.cuisine_terms.iter().any(|c| c == ALL_CUISINES) {
            &[]
        } else {
            &self.cuisine_terms
        };

        let terms: Vec<&str> = cuisine_terms
            .iter()
            .chain(self.dietary_terms.iter())
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .collect();

        if terms.is_empty() {
            None
        } else {
            Some(terms.join(" OR "))
        }
    }
}
