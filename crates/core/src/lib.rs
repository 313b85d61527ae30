pub mod domain;
pub mod ingest;
pub mod notify;
pub mod pipeline;
pub mod report;
pub mod screen;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    const DEFAULT_FINNHUB_BASE_URL: &str = "https://finnhub.io";
    const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
    const DEFAULT_SMTP_PORT: u16 = 465;
    const DEFAULT_TIMEOUT_SECS: u64 = 20;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub finnhub_api_key: Option<String>,
        pub finnhub_base_url: String,
        pub finnhub_timeout: Duration,
        pub email_user: Option<String>,
        pub email_pass: Option<String>,
        pub smtp_host: String,
        pub smtp_port: u16,
        pub smtp_timeout: Duration,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                finnhub_api_key: non_empty_var("FINNHUB_KEY"),
                finnhub_base_url: non_empty_var("FINNHUB_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_FINNHUB_BASE_URL.to_string()),
                finnhub_timeout: Duration::from_secs(parse_var(
                    "FINNHUB_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )?),
                email_user: non_empty_var("EMAIL_USER"),
                email_pass: non_empty_var("EMAIL_PASS"),
                smtp_host: non_empty_var("SMTP_HOST")
                    .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                smtp_port: parse_var("SMTP_PORT", DEFAULT_SMTP_PORT)?,
                smtp_timeout: Duration::from_secs(parse_var(
                    "SMTP_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )?),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_finnhub_api_key(&self) -> anyhow::Result<&str> {
            self.finnhub_api_key
                .as_deref()
                .context("FINNHUB_KEY is required")
        }

        pub fn require_email_user(&self) -> anyhow::Result<&str> {
            self.email_user.as_deref().context("EMAIL_USER is required")
        }

        pub fn require_email_pass(&self) -> anyhow::Result<&str> {
            self.email_pass.as_deref().context("EMAIL_PASS is required")
        }
    }

    // Empty values count as unset, same as a missing variable.
    fn non_empty_var(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|s| !s.trim().is_empty())
    }

    fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match non_empty_var(name) {
            Some(s) => s
                .trim()
                .parse::<T>()
                .with_context(|| format!("{name} is not a valid value: {s}")),
            None => Ok(default),
        }
    }
}
