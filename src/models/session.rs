use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::models::filter::FilterCriteria;
use crate::models::restaurant::PlaceCandidate;

/// Result of one search, handed from the search step to the selection step.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchSession {
    pub criteria: FilterCriteria,
    #[serde(rename = "restaurants")]
    pub candidates: Vec<PlaceCandidate>,
    #[serde(rename = "timestamp", with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl SearchSession {
    pub fn new(criteria: FilterCriteria, candidates: Vec<PlaceCandidate>) -> Self {
        Self {
            criteria,
            candidates,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct SelectionResult {
    pub chosen: PlaceCandidate,
}
