use std::sync::Arc;
use tracing::{info, warn};
use crate::models::filter::FilterCriteria;
use crate::models::restaurant::PlaceCandidate;
use crate::repositories::places_gateway::PlacesGateway;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub candidates: Vec<PlaceCandidate>,
    pub total_count: usize,
}

impl SearchOutcome {
    fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            total_count: 0,
        }
    }
}

pub struct SearchOrchestrator {
    gateway: Arc<PlacesGateway>,
}

impl SearchOrchestrator {
    pub fn new(gateway: Arc<PlacesGateway>) -> Self {
        Self { gateway }
    }

    /// Gateway failures come back as an empty outcome, indistinguishable from
    /// a search that matched nothing.
    pub async fn search(&self, criteria: &FilterCriteria) -> SearchOutcome {
        let Some(request) = criteria.to_nearby_search() else {
            warn!("Search requested without a location, returning no results");
            return SearchOutcome::empty();
        };

        let results = match self.gateway.search_nearby(&request).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Restaurant search failed, showing 0 results: {}", e);
                return SearchOutcome::empty();
            }
        };

        let candidates = filter_by_min_rating(results.restaurants, criteria.min_rating);
        info!("Search matched {} restaurants", candidates.len());

        SearchOutcome {
            total_count: candidates.len(),
            candidates,
        }
    }
}

/// Drops candidates rated below `min_rating`; a zero minimum keeps everything.
pub fn filter_by_min_rating(candidates: Vec<PlaceCandidate>, min_rating: f64) -> Vec<PlaceCandidate> {
    if min_rating <= 0.0 {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|candidate| candidate.rating >= min_rating)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::restaurant::{Geometry, Location};

    fn candidate(place_id: &str, rating: f64) -> PlaceCandidate {
        PlaceCandidate {
            place_id: place_id.to_string(),
            name: format!("Restaurant {}", place_id),
            rating,
            price_level: 1,
            vicinity: String::new(),
            geometry: Geometry {
                location: Location::new(0.0, 0.0),
            },
            photos: Vec::new(),
            types: Vec::new(),
            user_ratings_total: 0,
            business_status: None,
        }
    }

    #[test]
    fn zero_minimum_keeps_the_list_as_is() {
        let candidates = vec![candidate("a", 2.0), candidate("b", 0.0), candidate("c", 4.9)];

        assert_eq!(filter_by_min_rating(candidates.clone(), 0.0), candidates);
    }

    #[test]
    fn minimum_removes_exactly_the_lower_rated() {
        let candidates = vec![
            candidate("a", 4.5),
            candidate("b", 4.4),
            candidate("c", 5.0),
            candidate("d", 0.0),
        ];

        let kept: Vec<String> = filter_by_min_rating(candidates, 4.5)
            .into_iter()
            .map(|c| c.place_id)
            .collect();

        assert_eq!(kept, vec!["a", "c"]);
    }
}
