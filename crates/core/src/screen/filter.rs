use crate::domain::listing::{AdmittedListing, ListingRecord, LooseValue};
use crate::screen::price::compute_offer;
use crate::screen::ScreenConfig;
use chrono::NaiveDate;

/// Why a record was left out of the report. Checks run in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    DateMismatch,
    Status,
    Exchange,
    MissingField(&'static str),
    BelowThreshold { offer_high: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Admitted(AdmittedListing),
    Rejected(Rejection),
}

/// Runs the eligibility checks on one record, stopping at the first failure.
///
/// `reference_date` is the ISO `YYYY-MM-DD` string the record's date must equal exactly.
pub fn evaluate(record: &ListingRecord, reference_date: &str, config: &ScreenConfig) -> Verdict {
    if record.date.as_deref() != Some(reference_date) {
        return Verdict::Rejected(Rejection::DateMismatch);
    }

    let status = record.status.as_deref().unwrap_or_default().to_lowercase();
    if !config.statuses.contains(&status.as_str()) {
        return Verdict::Rejected(Rejection::Status);
    }

    let exchange = match record.exchange.as_deref() {
        Some(ex) if config.exchanges.iter().any(|want| ex.contains(want)) => ex,
        _ => return Verdict::Rejected(Rejection::Exchange),
    };

    let symbol = match record.symbol.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => return Verdict::Rejected(Rejection::MissingField("symbol")),
    };
    let price = match &record.price {
        Some(LooseValue::Text(s)) if s.is_empty() || s == "-" => None,
        other => other.as_ref(),
    };
    let Some(price) = price else {
        return Verdict::Rejected(Rejection::MissingField("price"));
    };
    let shares = match &record.shares {
        Some(v) if !v.is_empty_text() => v,
        _ => return Verdict::Rejected(Rejection::MissingField("numberOfShares")),
    };

    let offer = compute_offer(Some(price), Some(shares));
    // A numeric zero means "no estimate"; a string "0" is still shown.
    let total_value_hint = match &record.total_value_hint {
        Some(LooseValue::Number(n)) => n.as_f64().filter(|v| *v != 0.0),
        Some(other) => other.as_f64(),
        None => None,
    };

    tracing::debug!(
        symbol,
        status = %status,
        exchange,
        price = %price,
        shares = %shares,
        offer_high = offer.high,
        provider_total = ?total_value_hint,
        "evaluated listing offer"
    );

    if offer.high <= config.threshold_usd {
        return Verdict::Rejected(Rejection::BelowThreshold {
            offer_high: offer.high,
        });
    }

    Verdict::Admitted(AdmittedListing {
        symbol: symbol.to_string(),
        name: record.name.clone().unwrap_or_else(|| "N/A".to_string()),
        exchange: exchange.to_string(),
        status,
        price_display: price.to_string(),
        shares: shares.as_f64().unwrap_or(0.0).trunc() as i64,
        offer_high: offer.high,
        total_value_hint,
    })
}

/// Admitted listings in the order the provider returned them.
pub fn screen_listings(
    records: &[ListingRecord],
    reference_date: NaiveDate,
    config: &ScreenConfig,
) -> Vec<AdmittedListing> {
    let reference_date = reference_date.format("%Y-%m-%d").to_string();
    records
        .iter()
        .filter_map(|record| match evaluate(record, &reference_date, config) {
            Verdict::Admitted(listing) => Some(listing),
            Verdict::Rejected(_) => None,
        })
        .collect()
}
