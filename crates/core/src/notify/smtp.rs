use crate::config::Settings;
use crate::notify::Notifier;
use crate::report::Report;
use anyhow::Context;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;

/// Sends each report as a plain-text mail from the account to itself over implicit-TLS SMTP.
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    host: String,
    port: u16,
    timeout: Duration,
    user: String,
    pass: String,
}

impl SmtpNotifier {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            host: settings.smtp_host.clone(),
            port: settings.smtp_port,
            timeout: settings.smtp_timeout,
            user: settings.require_email_user()?.to_string(),
            pass: settings.require_email_pass()?.to_string(),
        })
    }

    fn message(&self, report: &Report) -> anyhow::Result<Message> {
        let mailbox: Mailbox = self
            .user
            .parse()
            .with_context(|| format!("EMAIL_USER is not a valid address: {}", self.user))?;

        Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(report.subject.clone())
            .body(report.body.clone())
            .context("failed to build report email")
    }

    fn transport(&self) -> anyhow::Result<SmtpTransport> {
        let creds = Credentials::new(self.user.clone(), self.pass.clone());
        Ok(SmtpTransport::relay(&self.host)
            .with_context(|| format!("invalid SMTP relay host: {}", self.host))?
            .port(self.port)
            .timeout(Some(self.timeout))
            .credentials(creds)
            .build())
    }
}

#[async_trait::async_trait]
impl Notifier for SmtpNotifier {
    fn channel(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, report: &Report) -> anyhow::Result<()> {
        let message = self.message(report)?;
        let transport = self.transport()?;

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .context("smtp send task panicked")?
            .context("smtp send failed")?;

        Ok(())
    }
}
