use serde::{Deserialize, Serialize};

/// A restaurant returned by a nearby search, after normalization.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlaceCandidate {
    pub place_id: String,
    pub name: String,
    pub rating: f64,
    pub price_level: u8,
    pub vicinity: String,
    pub geometry: Geometry,
    pub photos: Vec<Photo>,
    pub types: Vec<String>,
    pub user_ratings_total: u64,
    pub business_status: Option<String>,
}

impl PlaceCandidate {
    pub fn coordinates(&self) -> Location {
        self.geometry.location
    }

    pub fn price_label(&self) -> &'static str {
        price_label(self.price_level)
    }
}

/// Free and unknown price levels read as inexpensive.
pub fn price_label(price_level: u8) -> &'static str {
    match price_level {
        2 => "Moderate ($$)",
        3 => "Expensive ($$$)",
        4 => "Very Expensive ($$$$)",
        _ => "Inexpensive ($)",
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Photo {
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub html_attributions: Vec<String>,
    pub photo_reference: String,
    #[serde(default)]
    pub width: i64,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
