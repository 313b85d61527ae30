use clap::Parser;
use ipo_watch_core::ingest::finnhub::FinnhubCalendarClient;
use ipo_watch_core::notify::smtp::SmtpNotifier;
use ipo_watch_core::notify::{LogNotifier, Notifier};
use ipo_watch_core::screen::ScreenConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "ipo_watch_worker")]
struct Args {
    /// Reference date (YYYY-MM-DD). Defaults to today's date in Dubai.
    #[arg(long)]
    as_of_date: Option<String>,

    /// Fetch and screen, but log the report instead of emailing it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = ipo_watch_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let config = ScreenConfig::default();

    let reference_date = ipo_watch_core::time::resolve_reference_date(
        args.as_of_date.as_deref(),
        chrono::Utc::now(),
        config.timezone,
    )?;
    tracing::info!(%reference_date, timezone = %config.timezone, "resolved reference date");

    let provider = FinnhubCalendarClient::from_settings(&settings)?;
    let notifier: Box<dyn Notifier> = if args.dry_run {
        Box::new(LogNotifier)
    } else {
        Box::new(SmtpNotifier::from_settings(&settings)?)
    };

    let res = ipo_watch_core::pipeline::run_with_failure_report(
        &provider,
        notifier.as_ref(),
        reference_date,
        &config,
    )
    .await;

    match res {
        Ok(summary) => {
            tracing::info!(
                %reference_date,
                dry_run = args.dry_run,
                fetched = summary.fetched,
                admitted = summary.admitted,
                "ipo watch run complete"
            );
            Ok(())
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            Err(err)
        }
    }
}

fn init_sentry(settings: &ipo_watch_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
