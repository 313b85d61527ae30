pub mod filter;
pub mod price;

pub use filter::{evaluate, screen_listings, Rejection, Verdict};
pub use price::{compute_offer, OfferEstimate, PriceRange};

/// Fixed screening rules, passed explicitly into the filter and the report formatter.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Offers must strictly exceed this many dollars.
    pub threshold_usd: f64,
    /// Case-sensitive substrings; one must appear in the exchange field.
    pub exchanges: &'static [&'static str],
    /// Compared against the lowercased status.
    pub statuses: &'static [&'static str],
    pub timezone: chrono_tz::Tz,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            threshold_usd: 200_000_000.0,
            exchanges: &["NASDAQ", "NYSE"],
            statuses: &["expected", "priced"],
            timezone: chrono_tz::Asia::Dubai,
        }
    }
}

impl ScreenConfig {
    /// Short dollar label for the threshold, e.g. `$200M`.
    pub fn threshold_label(&self) -> String {
        format!("${}M", (self.threshold_usd / 1_000_000.0).round() as i64)
    }
}
