#![allow(dead_code)]

use std::sync::Arc;
use rouleat::config::PlacesConfig;
use rouleat::repositories::places_gateway::PlacesGateway;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-places-key";
pub const AUTOCOMPLETE_PATH: &str = "/v1/places:autocomplete";
pub const DETAILS_PATH: &str = "/maps/api/place/details/json";
pub const NEARBY_PATH: &str = "/maps/api/place/nearbysearch/json";

pub fn gateway_for(server: &MockServer) -> Arc<PlacesGateway> {
    let config = PlacesConfig::new(Some(TEST_API_KEY.to_string())).with_base_url(&server.uri());
    Arc::new(PlacesGateway::new(config).unwrap())
}

pub fn unconfigured_gateway(server: &MockServer) -> Arc<PlacesGateway> {
    let config = PlacesConfig::new(None).with_base_url(&server.uri());
    Arc::new(PlacesGateway::new(config).unwrap())
}

pub fn upstream_place(place_id: &str, name: &str, rating: Option<f64>) -> Value {
    let mut place = json!({
        "place_id": place_id,
        "name": name,
        "price_level": 2,
        "vicinity": format!("{} Mulberry St, New York", place_id.len()),
        "geometry": { "location": { "lat": 40.72, "lng": -73.99 } },
        "photos": [{
            "height": 400,
            "width": 600,
            "photo_reference": format!("photo-{}", place_id),
            "html_attributions": []
        }],
        "types": ["restaurant", "food", "point_of_interest"],
        "user_ratings_total": 120,
        "business_status": "OPERATIONAL"
    });
    if let Some(rating) = rating {
        place["rating"] = json!(rating);
    }
    place
}

/// Three Italian places rated 4.8, 3.9 and 4.1.
pub fn three_italian_places() -> Value {
    json!({
        "status": "OK",
        "results": [
            upstream_place("p-high", "Carbone", Some(4.8)),
            upstream_place("p-low", "Olive Grove", Some(3.9)),
            upstream_place("p-mid", "Lombardi's", Some(4.1)),
        ]
    })
}

pub fn place_details(place_id: &str, lat: f64, lng: f64) -> Value {
    json!({
        "status": "OK",
        "result": {
            "place_id": place_id,
            "name": "Union Square",
            "formatted_address": "Union Square, New York, NY, USA",
            "geometry": { "location": { "lat": lat, "lng": lng } },
            "types": ["park"]
        }
    })
}
