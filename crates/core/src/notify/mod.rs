use crate::report::Report;

pub mod smtp;

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;

    async fn send(&self, report: &Report) -> anyhow::Result<()>;
}

/// Writes the report to the log instead of delivering it. Used for dry runs.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    fn channel(&self) -> &'static str {
        "log"
    }

    async fn send(&self, report: &Report) -> anyhow::Result<()> {
        tracing::info!(subject = %report.subject, body = %report.body, "report (not delivered)");
        Ok(())
    }
}
