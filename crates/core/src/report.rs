use crate::domain::listing::AdmittedListing;
use crate::screen::ScreenConfig;
use chrono::NaiveDate;

const ENTRY_SEPARATOR: &str = "\n---------------------------------------\n";

/// One outbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

pub fn build_report(
    reference_date: NaiveDate,
    admitted: &[AdmittedListing],
    config: &ScreenConfig,
) -> Report {
    let label = config.threshold_label();
    let date = reference_date.format("%Y-%m-%d");

    if admitted.is_empty() {
        return Report {
            subject: format!("IPO Report [{date}]: No tickers > {label}"),
            body: format!(
                "Automation ran successfully. No same-day US IPOs exceeded {label} (price × shares)."
            ),
        };
    }

    let entries: Vec<String> = admitted.iter().map(render_entry).collect();
    Report {
        subject: format!("IPO Report [{date}]: {} tickers > {label}", admitted.len()),
        body: format!(
            "Same-day US IPOs exceeding {label}:\n\n{}",
            entries.join(ENTRY_SEPARATOR)
        ),
    }
}

/// Notification sent when the run fails. `err` is rendered with its full cause chain.
pub fn failure_report(reference_date: NaiveDate, err: &anyhow::Error) -> Report {
    Report {
        subject: format!("IPO Monitor ERROR [{}]", reference_date.format("%Y-%m-%d")),
        body: format!("Automation failed:\n\n{err:?}"),
    }
}

fn render_entry(listing: &AdmittedListing) -> String {
    let provider_total = listing
        .total_value_hint
        .map(format_usd)
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "{} ({})\n  Exchange: {}\n  Status: {}\n  Price: {} | Shares: {}\n  Est. Offer: {}\n  Finnhub totalSharesValue: {}",
        listing.symbol,
        listing.name,
        listing.exchange,
        listing.status,
        listing.price_display,
        group_thousands(&listing.shares.to_string()),
        format_usd(listing.offer_high),
        provider_total,
    )
}

/// Whole-dollar amount with comma grouping, e.g. `$400,000,000`.
pub fn format_usd(v: f64) -> String {
    format!("${}", group_thousands(&format!("{v:.0}")))
}

/// Inserts commas every three digits of an integer string, keeping a leading sign.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 27).unwrap()
    }

    fn listing(symbol: &str, total: Option<f64>) -> AdmittedListing {
        AdmittedListing {
            symbol: symbol.to_string(),
            name: format!("{symbol} Inc"),
            exchange: "NASDAQ Global Select".to_string(),
            status: "priced".to_string(),
            price_display: "10-20".to_string(),
            shares: 20_000_000,
            offer_high: 400_000_000.0,
            total_value_hint: total,
        }
    }

    #[test]
    fn empty_run_produces_fixed_no_tickers_report() {
        let report = build_report(date(), &[], &ScreenConfig::default());
        assert_eq!(report.subject, "IPO Report [2026-01-27]: No tickers > $200M");
        assert_eq!(
            report.body,
            "Automation ran successfully. No same-day US IPOs exceeded $200M (price × shares)."
        );
    }

    #[test]
    fn renders_one_block_per_listing() {
        let report = build_report(
            date(),
            &[listing("AAA", Some(350_000_000.0)), listing("BBB", None)],
            &ScreenConfig::default(),
        );

        assert_eq!(report.subject, "IPO Report [2026-01-27]: 2 tickers > $200M");
        let expected = "Same-day US IPOs exceeding $200M:\n\n\
AAA (AAA Inc)\n  Exchange: NASDAQ Global Select\n  Status: priced\n  Price: 10-20 | Shares: 20,000,000\n  Est. Offer: $400,000,000\n  Finnhub totalSharesValue: $350,000,000\
\n---------------------------------------\n\
BBB (BBB Inc)\n  Exchange: NASDAQ Global Select\n  Status: priced\n  Price: 10-20 | Shares: 20,000,000\n  Est. Offer: $400,000,000\n  Finnhub totalSharesValue: N/A";
        assert_eq!(report.body, expected);
        assert!(!report.body.ends_with(ENTRY_SEPARATOR));
        assert_eq!(report.body.matches(ENTRY_SEPARATOR).count(), 1);
    }

    #[test]
    fn formatting_is_deterministic() {
        let admitted = [listing("AAA", None), listing("CCC", Some(1.0))];
        let a = build_report(date(), &admitted, &ScreenConfig::default());
        let b = build_report(date(), &admitted, &ScreenConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(1_000.0), "$1,000");
        assert_eq!(format_usd(212_345_678.6), "$212,345,679");
        assert_eq!(format_usd(-1_234_567.0), "$-1,234,567");
        assert_eq!(group_thousands("123456"), "123,456");
    }

    #[test]
    fn failure_report_carries_the_cause_chain() {
        let err = anyhow::anyhow!("HTTP 502").context("calendar fetch failed");
        let report = failure_report(date(), &err);
        assert_eq!(report.subject, "IPO Monitor ERROR [2026-01-27]");
        assert!(report.body.starts_with("Automation failed:\n\ncalendar fetch failed"));
        assert!(report.body.contains("HTTP 502"));
    }
}
