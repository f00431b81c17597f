use std::fmt::Write;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::warn;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::diagnosis::Diagnosis;
use crate::domain::ports::reporter::{ReportError, Reporter};
use crate::domain::value_objects::severity::Severity;

/// Webhook payload format, auto-detected from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebhookFormat {
    Slack,
    Discord,
    Generic,
}

/// Posts alerts to an HTTP webhook endpoint.
///
/// Supports Slack (attachments), Discord (embeds) and generic JSON payloads.
/// Only alerts at or above `min_severity` are sent. HTTP errors are logged
/// and never propagated.
pub struct WebhookReporter {
    url: String,
    client: reqwest::Client,
    min_severity: Severity,
}

impl WebhookReporter {
    /// # Errors
    ///
    /// Returns `ReportError::ChannelUnavailable` if the HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(url: String, min_severity: Severity) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                ReportError::ChannelUnavailable(format!("cannot build HTTP client: {e}"))
            })?;

        Ok(Self {
            url,
            client,
            min_severity,
        })
    }

    fn detect_format(&self) -> WebhookFormat {
        let host = self
            .url
            .split("//")
            .nth(1)
            .and_then(|s| s.split('/').next())
            .and_then(|h| h.split(':').next())
            .unwrap_or("");

        if host == "hooks.slack.com" {
            WebhookFormat::Slack
        } else if host == "discord.com" || host == "discordapp.com" {
            WebhookFormat::Discord
        } else {
            WebhookFormat::Generic
        }
    }

    fn send_payload(&self, payload: &Value) {
        let result = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(self.client.post(&self.url).json(payload).send())
        });

        match result {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => warn!("Webhook HTTP {}", resp.status()),
            Err(e) => warn!("Webhook error: {e}"),
        }
    }

    const fn severity_color_hex(severity: Severity) -> &'static str {
        match severity {
            Severity::Info => "#3498DB",
            Severity::Ok => "#2ECC71",
            Severity::Warning => "#E67E22",
            Severity::Critical => "#E74C3C",
        }
    }

    const fn severity_color_decimal(severity: Severity) -> u32 {
        match severity {
            Severity::Info => 0x00_34_98_DB,
            Severity::Ok => 0x00_2E_CC_71,
            Severity::Warning => 0x00_E6_7E_22,
            Severity::Critical => 0x00_E7_4C_3C,
        }
    }

    fn format_alert(&self, alert: &Alert) -> Value {
        match self.detect_format() {
            WebhookFormat::Slack => Self::format_alert_slack(alert),
            WebhookFormat::Discord => Self::format_alert_discord(alert),
            WebhookFormat::Generic => Self::format_alert_generic(alert),
        }
    }

    fn format_alert_slack(alert: &Alert) -> Value {
        let diagnosis = &alert.diagnosis;
        let mut text = diagnosis.summary().to_string();
        for reason in &diagnosis.reasons {
            let _ = write!(text, "\n\u{2022} {reason}");
        }
        if !diagnosis.advice.is_empty() {
            text.push_str("\n*Advice:*");
            for advice in &diagnosis.advice {
                let _ = write!(text, "\n\u{2022} {advice}");
            }
        }

        json!({
            "attachments": [{
                "color": Self::severity_color_hex(alert.severity),
                "blocks": [
                    {
                        "type": "header",
                        "text": {
                            "type": "plain_text",
                            "text": format!("{} netcheck: {}", alert.severity.emoji(), alert.message)
                        }
                    },
                    {
                        "type": "section",
                        "fields": [
                            { "type": "mrkdwn", "text": format!("*Severity:*\n{}", alert.severity) },
                            { "type": "mrkdwn", "text": format!("*Status:*\n{}", diagnosis.status) }
                        ]
                    },
                    {
                        "type": "section",
                        "text": { "type": "mrkdwn", "text": text }
                    }
                ]
            }]
        })
    }

    fn format_alert_discord(alert: &Alert) -> Value {
        let diagnosis = &alert.diagnosis;
        let mut fields = vec![
            json!({ "name": "Severity", "value": alert.severity.to_string(), "inline": true }),
            json!({ "name": "Status", "value": diagnosis.status.to_string(), "inline": true }),
        ];
        if !diagnosis.advice.is_empty() {
            fields.push(json!({
                "name": "Advice",
                "value": diagnosis.advice.join("\n"),
                "inline": false
            }));
        }

        json!({
            "username": "netcheck",
            "embeds": [{
                "title": format!("{} {}", alert.severity.emoji(), alert.message),
                "description": diagnosis.reasons.join("\n"),
                "color": Self::severity_color_decimal(alert.severity),
                "fields": fields,
                "timestamp": alert.timestamp.to_rfc3339()
            }]
        })
    }

    fn format_alert_generic(alert: &Alert) -> Value {
        let diagnosis = &alert.diagnosis;
        json!({
            "source": "netcheck",
            "severity": alert.severity.to_string(),
            "kind": alert.kind.to_string(),
            "message": &alert.message,
            "status": diagnosis.status.to_string(),
            "reasons": &diagnosis.reasons,
            "advice": &diagnosis.advice,
            "timestamp": alert.timestamp.to_rfc3339()
        })
    }
}

impl Reporter for WebhookReporter {
    fn report_alert(&self, alert: &Alert) -> Result<(), ReportError> {
        if alert.severity < self.min_severity {
            return Ok(());
        }
        let payload = self.format_alert(alert);
        self.send_payload(&payload);
        Ok(())
    }

    /// One-shot diagnoses are not pushed to webhooks.
    fn report_diagnosis(&self, _diagnosis: &Diagnosis) -> Result<(), ReportError> {
        Ok(())
    }
}
