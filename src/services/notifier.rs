//! Alert delivery interface

use crate::models::report::SignalReport;
use crate::services::error::ServiceError;

/// Renders a signal report and delivers it to a messaging endpoint.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, report: &SignalReport) -> Result<(), ServiceError>;
}
