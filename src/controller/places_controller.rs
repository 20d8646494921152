use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use crate::controller::AppState;
use crate::error::AppError;
use crate::models::filter::NearbySearch;
use crate::models::restaurant::{Location, PlaceCandidate};
use crate::repositories::places_gateway::PlacesGateway;
use crate::services::search_orchestrator::filter_by_min_rating;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/autocomplete", post(autocomplete_places))
        .route("/details", post(retrieve_place_details))
        .route("/search", post(search_restaurants))
        .route_layer(Extension(app_state.gateway))
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
}

pub async fn autocomplete_places(
    Extension(gateway): Extension<Arc<PlacesGateway>>,
    payload: Result<Json<AutocompleteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let input = body.input.unwrap_or_default();
    let session_token = body.session_token.unwrap_or_default();

    return match gateway.autocomplete(&input, &session_token).await {
        Ok(predictions) => {
            (StatusCode::OK, Json(json!({ "predictions": predictions }))).into_response()
        }
        Err(e) => {
            warn!("Something went wrong fetching autocomplete predictions due to: {}", e);
            e.into_response()
        }
    };
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailsRequest {
    #[serde(default)]
    pub place_id: Option<String>,
}

pub async fn retrieve_place_details(
    Extension(gateway): Extension<Arc<PlacesGateway>>,
    payload: Result<Json<PlaceDetailsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let place_id = body.place_id.unwrap_or_default();

    return match gateway.get_details(&place_id).await {
        Ok(place) => (StatusCode::OK, Json(json!({ "place": place }))).into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving place details due to: {}", e);
            e.into_response()
        }
    };
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct LocationParam {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchRestaurantsRequest {
    #[serde(default)]
    pub location: Option<LocationParam>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub page_token: Option<String>,
}

impl SearchRestaurantsRequest {
    fn to_nearby_search(&self) -> Result<NearbySearch, AppError> {
        let origin = match &self.location {
            Some(LocationParam {
                lat: Some(lat),
                lng: Some(lng),
            }) => Location::new(*lat, *lng),
            _ => {
                return Err(AppError::validation(
                    "location",
                    "Location coordinates are required",
                ))
            }
        };

        let mut search = NearbySearch::new(origin);
        if let Some(radius) = self.radius {
            search.radius_km = radius;
        }
        search.cuisine_terms = self.cuisine.clone();
        if let Some(price_level) = self.price_level {
            if !(1..=4).contains(&price_level) {
                return Err(AppError::validation(
                    "priceLevel",
                    "Price level must be between 1 and 4",
                ));
            }
            search.price_level = Some(price_level);
        }
        search.dietary_terms = self.dietary_restrictions.clone();
        search.page_token = self.page_token.clone();
        Ok(search)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchRestaurantsResponse {
    pub restaurants: Vec<PlaceCandidate>,
    pub total_results: usize,
    pub next_page_token: Option<String>,
}

pub async fn search_restaurants(
    Extension(gateway): Extension<Arc<PlacesGateway>>,
    payload: Result<Json<SearchRestaurantsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let search = match body.to_nearby_search() {
        Ok(search) => search,
        Err(e) => return e.into_response(),
    };

    return match gateway.search_nearby(&search).await {
        Ok(results) => {
            let restaurants = filter_by_min_rating(
                results.restaurants,
                body.min_rating.unwrap_or(0.0),
            );
            (
                StatusCode::OK,
                Json(SearchRestaurantsResponse {
                    total_results: restaurants.len(),
                    restaurants,
                    next_page_token: results.next_page_token,
                }),
            ).into_response()
        }
        Err(e) => {
            warn!("Something went wrong searching for restaurants due to: {}", e);
            e.into_response()
        }
    };
}
