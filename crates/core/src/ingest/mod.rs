pub mod finnhub;
pub mod provider;
pub mod types;
