use anyhow::Context;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use serde_with::{serde_as, DefaultOnNull};
use tracing::{debug, warn};
use crate::config::PlacesConfig;
use crate::error::AppError;
use crate::models::filter::NearbySearch;
use crate::models::place_detail::{OpeningHours, PlaceDetail, Review};
use crate::models::prediction::Prediction;
use crate::models::restaurant::{Geometry, PlaceCandidate, Photo};

pub const MIN_AUTOCOMPLETE_INPUT: usize = 3;
pub const RESTAURANT_TYPE: &str = "restaurant";

const AUTOCOMPLETE_FIELD_MASK: &str =
    "suggestions.placePrediction.placeId,suggestions.placePrediction.text.text";

const DETAIL_FIELDS: [&str; 14] = [
    "place_id",
    "name",
    "formatted_address",
    "geometry",
    "rating",
    "user_ratings_total",
    "price_level",
    "photos",
    "types",
    "business_status",
    "formatted_phone_number",
    "website",
    "opening_hours",
    "reviews",
];

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyResults {
    pub restaurants: Vec<PlaceCandidate>,
    pub next_page_token: Option<String>,
}

/// Translates the places provider's endpoints into the crate's own shapes.
pub struct PlacesGateway {
    client: Client,
    config: PlacesConfig,
}

impl PlacesGateway {
    pub fn new(config: PlacesConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("Failed to build the places HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, AppError> {
        self.config.api_key.as_deref().ok_or_else(|| {
            warn!("Places API key is not configured");
            AppError::Config
        })
    }

    pub async fn autocomplete(
        &self,
        input: &str,
        session_token: &str,
    ) -> Result<Vec<Prediction>, AppError> {
        let input = input.trim();
        if input.chars().count() < MIN_AUTOCOMPLETE_INPUT {
            return Err(AppError::validation(
                "input",
                "Input must be at least 3 characters",
            ));
        }
        let api_key = self.api_key()?;

        let mut body = json!({ "input": input });
        if !session_token.is_empty() {
            body["sessionToken"] = json!(session_token);
        }

        let response = self
            .client
            .post(&self.config.autocomplete_url)
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", AUTOCOMPLETE_FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response, "Failed to fetch places").await?;
        let body: AutocompleteResponse = decode(response).await?;

        let predictions = body
            .suggestions
            .into_iter()
            .filter_map(|suggestion| suggestion.place_prediction)
            .map(|prediction| Prediction {
                place_id: prediction.place_id,
                description: prediction.text.map(|t| t.text).unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        debug!("Autocomplete returned {} predictions", predictions.len());
        Ok(predictions)
    }

    pub async fn get_details(&self, place_id: &str) -> Result<PlaceDetail, AppError> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(AppError::validation("placeId", "Place ID is required"));
        }
        let api_key = self.api_key()?;

        let fields = DETAIL_FIELDS.join(",");
        let response = self
            .client
            .get(format!("{}/details/json", self.config.places_api_url))
            .query(&[
                ("place_id", place_id),
                ("fields", fields.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response, "Failed to fetch place details").await?;
        let body: DetailsResponse = decode(response).await?;

        if body.status != STATUS_OK {
            return Err(status_error(&body.status, body.error_message.as_deref()));
        }

        let place = body.result.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Details response for {} had no result", place_id))
        })?;

        Ok(place.into())
    }

    pub async fn search_nearby(&self, search: &NearbySearch) -> Result<NearbyResults, AppError> {
        let api_key = self.api_key()?;

        let mut params: Vec<(&str, String)> = vec![
            (
                "location",
                format!("{},{}", search.origin.lat, search.origin.lng),
            ),
            ("radius", search.radius_meters().to_string()),
            ("type", RESTAURANT_TYPE.to_string()),
            ("key", api_key.to_string()),
        ];
        if let Some(keyword) = search.keyword() {
            params.push(("keyword", keyword));
        }
        if let Some(price_level) = search.price_level {
            params.push(("maxprice", price_level.to_string()));
        }
        if let Some(page_token) = &search.page_token {
            params.push(("pagetoken", page_token.clone()));
        }

        let response = self
            .client
            .get(format!("{}/nearbysearch/json", self.config.places_api_url))
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response, "Failed to fetch restaurants").await?;
        let body: NearbySearchResponse = decode(response).await?;

        if body.status != STATUS_OK && body.status != STATUS_ZERO_RESULTS {
            return Err(status_error(&body.status, body.error_message.as_deref()));
        }

        let restaurants = body
            .results
            .into_iter()
            .filter_map(UpstreamPlace::into_candidate)
            .collect::<Vec<_>>();

        debug!("Nearby search returned {} restaurants", restaurants.len());
        Ok(NearbyResults {
            restaurants,
            next_page_token: body.next_page_token,
        })
    }
}

async fn ensure_success(response: Response, message: &str) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Places API responded with {}: {}", status, body);
    Err(AppError::upstream(status, message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    response
        .json::<T>()
        .await
        .context("Failed to decode places API response")
        .map_err(AppError::Internal)
}

fn transport_error(e: reqwest::Error) -> AppError {
    warn!("Places API request failed due to: {}", e);
    AppError::upstream(StatusCode::BAD_GATEWAY, "Failed to reach places API")
}

fn status_error(status: &str, error_message: Option<&str>) -> AppError {
    warn!(
        "Places API returned status {}: {}",
        status,
        error_message.unwrap_or("no message")
    );
    AppError::upstream(StatusCode::BAD_REQUEST, format!("Places API error: {}", status))
}

#[serde_as]
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct AutocompleteResponse {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Suggestion {
    place_prediction: Option<PlacePrediction>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PlacePrediction {
    place_id: String,
    text: Option<PredictionText>,
}

#[derive(Deserialize, Debug)]
struct PredictionText {
    text: String,
}

#[derive(Deserialize, Debug)]
struct DetailsResponse {
    status: String,
    error_message: Option<String>,
    result: Option<UpstreamDetail>,
}

#[serde_as]
#[derive(Deserialize, Debug)]
struct UpstreamDetail {
    #[serde(default)]
    place_id: String,
    #[serde(default)]
    name: String,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    price_level: Option<u8>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    photos: Vec<Photo>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    types: Vec<String>,
    business_status: Option<String>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    opening_hours: Option<OpeningHours>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    reviews: Vec<Review>,
}

impl From<UpstreamDetail> for PlaceDetail {
    fn from(place: UpstreamDetail) -> Self {
        Self {
            place_id: place.place_id,
            name: place.name,
            formatted_address: place.formatted_address,
            geometry: place.geometry,
            rating: place.rating.unwrap_or(0.0),
            user_ratings_total: place.user_ratings_total.unwrap_or(0),
            price_level: place.price_level.unwrap_or(0),
            photos: place.photos,
            types: place.types,
            business_status: place.business_status,
            formatted_phone_number: place.formatted_phone_number,
            website: place.website,
            opening_hours: place.opening_hours,
            reviews: place.reviews,
        }
    }
}

#[serde_as]
#[derive(Deserialize, Debug)]
struct NearbySearchResponse {
    status: String,
    error_message: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    results: Vec<UpstreamPlace>,
    next_page_token: Option<String>,
}

#[serde_as]
#[derive(Deserialize, Debug)]
struct UpstreamPlace {
    place_id: String,
    #[serde(default)]
    name: String,
    rating: Option<f64>,
    price_level: Option<u8>,
    #[serde(default)]
    vicinity: String,
    geometry: Option<Geometry>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    photos: Vec<Photo>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    types: Vec<String>,
    user_ratings_total: Option<u64>,
    business_status: Option<String>,
}

impl UpstreamPlace {
    /// `None` for places the provider returned without coordinates.
    fn into_candidate(self) -> Option<PlaceCandidate> {
        let Some(geometry) = self.geometry else {
            debug!("Skipping place {} without geometry", self.place_id);
            return None;
        };

        // price level 0 means free, which is listed alongside inexpensive
        let price_level = match self.price_level {
            Some(level) if level >= 1 => level.min(4),
            _ => 1,
        };

        Some(PlaceCandidate {
            place_id: self.place_id,
            name: self.name,
            rating: self.rating.unwrap_or(0.0).clamp(0.0, 5.0),
            price_level,
            vicinity: self.vicinity,
            geometry,
            photos: self.photos,
            types: self.types,
            user_ratings_total: self.user_ratings_total.unwrap_or(0),
            business_status: self.business_status,
        })
    }
}
