pub mod address_search;
pub mod filter_state;
pub mod roulette_flow;
pub mod search_orchestrator;
pub mod selector;
