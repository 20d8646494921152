use serde::{Deserialize, Serialize};

/// One autocomplete suggestion for an address typed by the user.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Prediction {
    pub place_id: String,
    pub description: String,
}
