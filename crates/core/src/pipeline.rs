use crate::ingest::provider::CalendarProvider;
use crate::notify::Notifier;
use crate::report::{build_report, failure_report, Report};
use crate::screen::{screen_listings, ScreenConfig};
use anyhow::Context;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub reference_date: NaiveDate,
    pub fetched: usize,
    pub admitted: usize,
    pub report: Report,
}

/// Fetches the day's calendar, screens it, and sends exactly one report.
pub async fn run_once(
    provider: &dyn CalendarProvider,
    notifier: &dyn Notifier,
    reference_date: NaiveDate,
    config: &ScreenConfig,
) -> anyhow::Result<RunSummary> {
    tracing::info!(
        %reference_date,
        provider = provider.provider_name(),
        "fetching same-day listings"
    );
    let listings = provider
        .fetch_listings(reference_date, reference_date)
        .await
        .with_context(|| format!("failed to fetch listings for {reference_date}"))?;

    let admitted = screen_listings(&listings, reference_date, config);
    tracing::info!(
        %reference_date,
        fetched = listings.len(),
        admitted = admitted.len(),
        "screened listings"
    );

    let report = build_report(reference_date, &admitted, config);
    notifier
        .send(&report)
        .await
        .with_context(|| format!("failed to send report via {}", notifier.channel()))?;
    tracing::info!(%reference_date, subject = %report.subject, "report sent");

    Ok(RunSummary {
        reference_date,
        fetched: listings.len(),
        admitted: admitted.len(),
        report,
    })
}

/// [`run_once`], plus a best-effort failure notification when it errors.
///
/// The original error is always returned; a failure to deliver the notification is only logged.
pub async fn run_with_failure_report(
    provider: &dyn CalendarProvider,
    notifier: &dyn Notifier,
    reference_date: NaiveDate,
    config: &ScreenConfig,
) -> anyhow::Result<RunSummary> {
    match run_once(provider, notifier, reference_date, config).await {
        Ok(summary) => Ok(summary),
        Err(err) => {
            tracing::error!(%reference_date, error = %format!("{err:#}"), "run failed");
            let report = failure_report(reference_date, &err);
            match notifier.send(&report).await {
                Ok(()) => tracing::warn!(%reference_date, "failure report sent"),
                Err(send_err) => tracing::error!(
                    %reference_date,
                    error = %format!("{send_err:#}"),
                    "failure report could not be delivered"
                ),
            }
            Err(err)
        }
    }
}
