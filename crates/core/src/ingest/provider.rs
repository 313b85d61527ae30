use crate::domain::listing::ListingRecord;
use anyhow::Result;
use chrono::NaiveDate;
use std::fmt;

#[async_trait::async_trait]
pub trait CalendarProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Listings scheduled between `from` and `to`, inclusive, in provider order.
    /// An empty calendar is an empty vector, not an error.
    async fn fetch_listings(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ListingRecord>>;
}

/// A calendar request that reached the provider but came back with a non-success status.
#[derive(Debug, Clone)]
pub struct FetchError {
    pub provider: &'static str,
    pub status: u16,
    pub body: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "calendar fetch failed (provider={}, status={}): {}",
            self.provider, self.status, self.body
        )
    }
}

impl std::error::Error for FetchError {}
