use crate::config::Settings;
use crate::domain::listing::ListingRecord;
use crate::ingest::provider::{CalendarProvider, FetchError};
use crate::ingest::types::IpoCalendarResponse;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::time::Duration;

const IPO_CALENDAR_PATH: &str = "/api/v1/calendar/ipo";

#[derive(Debug, Clone)]
pub struct FinnhubCalendarClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl FinnhubCalendarClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let token = settings.require_finnhub_api_key()?.to_string();
        Self::new(&settings.finnhub_base_url, token, settings.finnhub_timeout)
    }

    pub fn new(base_url: &str, token: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build finnhub http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, IPO_CALENDAR_PATH)
    }
}

#[async_trait::async_trait]
impl CalendarProvider for FinnhubCalendarClient {
    fn provider_name(&self) -> &'static str {
        "finnhub"
    }

    async fn fetch_listings(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ListingRecord>> {
        let res = self
            .http
            .get(self.url())
            .query(&[
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("token", self.token.clone()),
            ])
            .send()
            .await
            .context("finnhub ipo calendar request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read finnhub response body")?;

        if !status.is_success() {
            return Err(FetchError {
                provider: self.provider_name(),
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        let parsed = serde_json::from_str::<IpoCalendarResponse>(&text)
            .with_context(|| format!("finnhub response is not a valid ipo calendar: {text}"))?;
        Ok(parsed.into_listings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 27).unwrap()
    }

    async fn client_for(server: &MockServer) -> FinnhubCalendarClient {
        FinnhubCalendarClient::new(&server.uri(), "test-token".to_string(), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn fetches_calendar_with_date_window_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(IPO_CALENDAR_PATH))
            .and(query_param("from", "2026-01-27"))
            .and(query_param("to", "2026-01-27"))
            .and(query_param("token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ipoCalendar": [
                    {"date": "2026-01-27", "symbol": "AAA", "price": "10-20", "numberOfShares": 20000000},
                    {"date": "2026-01-27", "symbol": "BBB", "price": 15, "numberOfShares": null}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let listings = client_for(&server)
            .await
            .fetch_listings(day(), day())
            .await
            .unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].symbol.as_deref(), Some("AAA"));
        assert_eq!(listings[1].shares, None);
    }

    #[tokio::test]
    async fn null_or_missing_calendar_is_empty() {
        for body in [json!({"ipoCalendar": null}), json!({})] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&server)
                .await;

            let listings = client_for(&server)
                .await
                .fetch_listings(day(), day())
                .await
                .unwrap();
            assert!(listings.is_empty());
        }
    }

    #[tokio::test]
    async fn http_error_surfaces_as_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .fetch_listings(day(), day())
            .await
            .unwrap_err();
        let fetch = err.downcast_ref::<FetchError>().expect("FetchError");
        assert_eq!(fetch.status, 401);
        assert_eq!(fetch.body, "invalid token");
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let res = client_for(&server).await.fetch_listings(day(), day()).await;
        assert!(res.is_err());
    }
}
