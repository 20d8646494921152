pub mod blob_store;
pub mod places_gateway;
pub mod session_handoff;
