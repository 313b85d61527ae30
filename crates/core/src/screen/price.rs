use crate::domain::listing::LooseValue;

/// Low/high price bounds parsed from the provider's free-form price field.
///
/// Anything unparseable collapses to `(0.0, 0.0)`; a single value gives `low == high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    pub const ZERO: Self = Self { low: 0.0, high: 0.0 };

    pub fn single(v: f64) -> Self {
        Self { low: v, high: v }
    }

    pub fn from_field(raw: Option<&LooseValue>) -> Self {
        match raw {
            Some(v) => Self::parse(&v.to_string()),
            None => Self::ZERO,
        }
    }

    /// Accepts `"12"`, `"$12"`, `"10-12"`, `"$10-$12"`, `"12-"`; never fails.
    pub fn parse(raw: &str) -> Self {
        let cleaned = raw.trim().replace('$', "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() || cleaned == "-" {
            return Self::ZERO;
        }

        if !cleaned.contains('-') {
            return parse_f64(cleaned).map_or(Self::ZERO, Self::single);
        }

        let parts: Vec<&str> = cleaned
            .split('-')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [] => Self::ZERO,
            [only] => parse_f64(only).map_or(Self::ZERO, Self::single),
            [low, high, ..] => match (parse_f64(low), parse_f64(high)) {
                (Some(low), Some(high)) => Self { low, high },
                _ => Self::ZERO,
            },
        }
    }
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Price bounds multiplied by the share count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferEstimate {
    pub low: f64,
    pub high: f64,
}

/// Share count as a float; absent or non-numeric counts are zero.
pub fn share_count(raw: Option<&LooseValue>) -> f64 {
    raw.and_then(LooseValue::as_f64).unwrap_or(0.0)
}

pub fn compute_offer(price: Option<&LooseValue>, shares: Option<&LooseValue>) -> OfferEstimate {
    let shares = share_count(shares);
    let range = PriceRange::from_field(price);
    OfferEstimate {
        low: range.low * shares,
        high: range.high * shares,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(low: f64, high: f64) -> PriceRange {
        PriceRange { low, high }
    }

    #[test]
    fn parses_two_sided_ranges() {
        assert_eq!(PriceRange::parse("10-20"), range(10.0, 20.0));
        assert_eq!(PriceRange::parse(" 14.50 - 16.50 "), range(14.5, 16.5));
        assert_eq!(PriceRange::parse("$50-$60"), range(50.0, 60.0));
        // Fragments after the second are ignored.
        assert_eq!(PriceRange::parse("1-2-3"), range(1.0, 2.0));
    }

    #[test]
    fn one_sided_ranges_use_the_present_value() {
        assert_eq!(PriceRange::parse("50-"), range(50.0, 50.0));
        assert_eq!(PriceRange::parse("-60"), range(60.0, 60.0));
        assert_eq!(PriceRange::parse("50"), range(50.0, 50.0));
        assert_eq!(PriceRange::parse("$ 17"), range(17.0, 17.0));
    }

    #[test]
    fn placeholders_and_garbage_collapse_to_zero() {
        for raw in ["", "   ", "-", "$", "--", "TBD", "10-abc", "abc-10", "1e-5"] {
            assert_eq!(PriceRange::parse(raw), PriceRange::ZERO, "input {raw:?}");
        }
        assert_eq!(PriceRange::from_field(None), PriceRange::ZERO);
    }

    #[test]
    fn numeric_fields_are_read_through_their_text() {
        assert_eq!(
            PriceRange::from_field(Some(&LooseValue::number(12.5))),
            range(12.5, 12.5)
        );
    }

    #[test]
    fn offer_is_price_times_shares() {
        let offer = compute_offer(
            Some(&LooseValue::text("10-20")),
            Some(&LooseValue::text("20000000")),
        );
        assert_eq!(offer.low, 200_000_000.0);
        assert_eq!(offer.high, 400_000_000.0);

        let again = compute_offer(
            Some(&LooseValue::text("10-20")),
            Some(&LooseValue::text("20000000")),
        );
        assert_eq!(offer, again);
    }

    #[test]
    fn missing_or_bad_shares_zero_the_offer() {
        let price = LooseValue::text("10-20");
        for shares in [None, Some(LooseValue::text("")), Some(LooseValue::text("many"))] {
            let offer = compute_offer(Some(&price), shares.as_ref());
            assert_eq!(offer, OfferEstimate { low: 0.0, high: 0.0 });
        }
    }
}
