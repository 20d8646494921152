mod common;

use reqwest::StatusCode;
use rouleat::error::AppError;
use rouleat::models::filter::NearbySearch;
use rouleat::models::restaurant::Location;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;

#[tokio::test]
async fn short_autocomplete_input_never_reaches_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUTOCOMPLETE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "suggestions": [] })))
        .expect(0)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    for input in ["", "  ", "ab", "  ny  "] {
        let err = gateway.autocomplete(input, "token").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "input", .. }));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn missing_credential_is_a_config_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let gateway = unconfigured_gateway(&server);

    let err = gateway.autocomplete("Union Square", "token").await.unwrap_err();
    assert!(matches!(err, AppError::Config));

    let err = gateway.get_details("place-1").await.unwrap_err();
    assert!(matches!(err, AppError::Config));

    let err = gateway
        .search_nearby(&NearbySearch::new(Location::new(40.7, -74.0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Config));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn autocomplete_keeps_only_place_predictions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUTOCOMPLETE_PATH))
        .and(header("X-Goog-Api-Key", TEST_API_KEY))
        .and(body_partial_json(json!({ "input": "Union Sq", "sessionToken": "abc123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestions": [
                { "placePrediction": { "placeId": "p1", "text": { "text": "Union Square, New York" } } },
                { "queryPrediction": { "text": { "text": "union square restaurants" } } },
                { "placePrediction": { "placeId": "p2", "text": { "text": "Union Square, San Francisco" } } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let predictions = gateway.autocomplete("  Union Sq ", "abc123").await.unwrap();

    let ids: Vec<&str> = predictions.iter().map(|p| p.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(predictions[1].description, "Union Square, San Francisco");
}

#[tokio::test]
async fn autocomplete_propagates_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUTOCOMPLETE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": { "message": "denied" } })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let err = gateway.autocomplete("Union Square", "t").await.unwrap_err();

    assert!(matches!(err, AppError::Upstream { .. }));
    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn details_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .and(query_param("place_id", "place-42"))
        .and(query_param("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "place_id": "place-42",
                "name": "Joe's Pizza",
                "formatted_address": "7 Carmine St, New York",
                "geometry": { "location": { "lat": 40.73, "lng": -74.0 } },
                "rating": 4.5,
                "opening_hours": { "open_now": true },
                "reviews": [{ "author_name": "Sam", "rating": 5, "text": "Great slice", "time": 1700000000 }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let detail = gateway.get_details("place-42").await.unwrap();

    assert_eq!(detail.name, "Joe's Pizza");
    assert_eq!(detail.rating, 4.5);
    assert_eq!(detail.user_ratings_total, 0);
    assert_eq!(detail.price_level, 0);
    assert!(detail.photos.is_empty());
    assert!(detail.types.is_empty());
    let hours = detail.opening_hours.unwrap();
    assert_eq!(hours.open_now, Some(true));
    assert!(hours.weekday_text.is_empty());
    assert_eq!(detail.reviews[0].author_name, "Sam");
}

#[tokio::test]
async fn details_require_a_place_id_and_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "NOT_FOUND" })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let err = gateway.get_details("   ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation { field: "placeId", .. }));

    let err = gateway.get_details("gone").await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Places API error: NOT_FOUND");
}

#[tokio::test]
async fn nearby_search_builds_the_upstream_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("location", "40.7,-74"))
        .and(query_param("radius", "2500"))
        .and(query_param("type", "restaurant"))
        .and(query_param("keyword", "Italian OR Greek OR Vegan"))
        .and(query_param("maxprice", "2"))
        .and(query_param("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [upstream_place("p1", "Carbone", Some(4.8)), {
                "place_id": "p2",
                "name": "Nameless Diner",
                "geometry": { "location": { "lat": 40.71, "lng": -74.01 } }
            }, {
                "place_id": "p3",
                "name": "Somewhere Else"
            }],
            "next_page_token": "next-123"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let search = NearbySearch {
        radius_km: 2.5,
        cuisine_terms: vec!["Italian".to_string(), "Greek".to_string()],
        dietary_terms: vec!["Vegan".to_string()],
        price_level: Some(2),
        ..NearbySearch::new(Location::new(40.7, -74.0))
    };
    let results = gateway.search_nearby(&search).await.unwrap();

    // p3 came back without coordinates and cannot be placed on a map
    let ids: Vec<&str> = results.restaurants.iter().map(|r| r.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(results.next_page_token.as_deref(), Some("next-123"));
    let nameless = &results.restaurants[1];
    assert_eq!(nameless.rating, 0.0);
    assert_eq!(nameless.price_level, 1);
    assert_eq!(nameless.user_ratings_total, 0);
}

#[tokio::test]
async fn zero_results_is_a_successful_empty_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let results = gateway
        .search_nearby(&NearbySearch::new(Location::new(0.5, 0.5)))
        .await
        .unwrap();

    assert!(results.restaurants.is_empty());
    assert!(results.next_page_token.is_none());
}

#[tokio::test]
async fn other_nearby_statuses_are_upstream_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    let err = gateway
        .search_nearby(&NearbySearch::new(Location::new(40.7, -74.0)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Upstream { .. }));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}
