use crate::domain::listing::ListingRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IpoCalendarResponse {
    #[serde(default, rename = "ipoCalendar")]
    pub ipo_calendar: Option<Vec<serde_json::Value>>,
}

impl IpoCalendarResponse {
    /// Converts each calendar entry on its own; entries that are not listing objects are skipped.
    pub fn into_listings(self) -> Vec<ListingRecord> {
        self.ipo_calendar
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<ListingRecord>(raw) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping malformed calendar record");
                    None
                }
            })
            .collect()
    }
}
