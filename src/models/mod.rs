pub mod filter;
pub mod place_detail;
pub mod prediction;
pub mod restaurant;
pub mod session;
