use serde::{Deserialize, Serialize};
use crate::models::restaurant::{Geometry, Photo};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlaceDetail {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    pub rating: f64,
    pub user_ratings_total: u64,
    pub price_level: u8,
    pub photos: Vec<Photo>,
    pub types: Vec<String>,
    pub business_status: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub reviews: Vec<Review>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Review {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub relative_time_description: String,
}
