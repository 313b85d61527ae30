use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A field the calendar provider may send as a JSON number, a string, or something else entirely.
///
/// Coercion to a number happens once, through [`LooseValue::as_f64`], instead of at each use site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl LooseValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    #[cfg(test)]
    pub(crate) fn number(v: f64) -> Self {
        serde_json::Number::from_f64(v)
            .map(Self::Number)
            .unwrap_or(Self::Other(serde_json::Value::Null))
    }

    /// Numeric reading of the value, accepting numeric strings with surrounding whitespace.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Other(_) => None,
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for LooseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

/// One entry of the IPO calendar as returned by the provider. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub exchange: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default)]
    pub price: Option<LooseValue>,
    #[serde(default, rename = "numberOfShares")]
    pub shares: Option<LooseValue>,
    /// The provider's own offer size estimate. Display only.
    #[serde(default, rename = "totalSharesValue")]
    pub total_value_hint: Option<LooseValue>,
}

/// Text fields keep whatever the provider sent, with non-string values rendered as their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseValue>::deserialize(deserializer)?.map(|v| v.to_string()))
}

/// A listing that passed every eligibility check, with the values the report needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmittedListing {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    /// Lowercased.
    pub status: String,
    /// The raw price field as the provider sent it.
    pub price_display: String,
    pub shares: i64,
    pub offer_high: f64,
    pub total_value_hint: Option<f64>,
}
