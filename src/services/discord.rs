//! Discord webhook notifier

use serde::Serialize;
use tracing::{debug, info};

use crate::models::report::SignalReport;
use crate::services::error::{check_status, ServiceError};
use crate::services::notifier::Notifier;

pub const WEBHOOK_USERNAME: &str = "Market Monitor";

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    username: &'a str,
    content: String,
}

pub struct DiscordNotifier {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self::with_client(webhook_url, reqwest::Client::new())
    }

    pub fn with_client(webhook_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, report: &SignalReport) -> Result<(), ServiceError> {
        debug!(symbol = %report.symbol, "Discord: sending alert for {}", report.symbol);

        let payload = WebhookPayload {
            username: WEBHOOK_USERNAME,
            content: render_report(report),
        };
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;
        check_status(response).await?;

        info!(symbol = %report.symbol, "Discord: alert delivered for {}", report.symbol);
        Ok(())
    }
}

/// Render a report as Discord markdown.
pub fn render_report(report: &SignalReport) -> String {
    let title = if report.is_multi_signal() {
        format!("🚀🔥🧨 **MULTIPLE SIGNALS ON {}** 🚀🔥🧨", report.symbol)
    } else {
        format!("🤖 **FULL ANALYSIS: {}** 🤖", report.symbol)
    };
    let ind = &report.indicators;

    format!(
        "{title}\n\n\
         💹 **Price:** {price:.2} {change:+.2} ({pct})\n\n\
         --- **TECHNICAL ANALYSIS** ---\n\
         📊 **Volume:** {volume} (Average: {avg})\n\
         🔥 **Volume Ratio:** {ratio:.2}x\n\
         🧱 **Resistance ({period}d):** {resistance:.2}\n\
         📈 **20d Average:** {ma:.2}\n\
         📏 **Range 10d / 50d:** {r10:.2} / {r50:.2}\n\
         📦 **Volume 3d / prior 20d:** {v3} / {v20}\n\n\
         --- **SIGNALS DETECTED** ---\n\
         ➡️ {signals}",
        title = title,
        price = report.price,
        change = report.change,
        pct = report.change_percent,
        volume = format_thousands(report.volume),
        avg = format_thousands(ind.avg_volume_20.round().max(0.0) as u64),
        ratio = ind.volume_ratio,
        period = ind.resistance_period,
        resistance = ind.resistance,
        ma = ind.moving_avg_20,
        r10 = ind.range_10,
        r50 = ind.range_50,
        v3 = format_thousands(ind.volume_3.round().max(0.0) as u64),
        v20 = format_thousands(ind.volume_prev_20.round().max(0.0) as u64),
        signals = report.signals.joined_labels(),
    )
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
