//! Insight gateway - asks an external text-generation model for business
//! observations about recent sales and current stock.
//!
//! The gateway owns the failure contract: whatever goes wrong (network,
//! provider status, malformed reply, timeout), callers get an empty list and
//! a warning in the log.

pub mod error;
pub mod gemini;

pub use error::InsightError;
pub use gemini::{GeminiClient, GeminiConfig};

use crate::models::{Insight, Medicine, Sale};
use chrono::NaiveDate;
use serde::Serialize;
use std::{future::Future, time::Duration};
use tracing::{info, warn};

/// Number of most recent sales included in a request.
pub const SALES_SAMPLE_SIZE: usize = 50;

/// Default time to wait for the provider.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A backend that turns a prompt into raw model text.
pub trait InsightProvider {
    /// Sends `prompt` and returns the model's text reply unparsed.
    fn summarize(&self, prompt: &str)
    -> impl Future<Output = Result<String, InsightError>> + Send;
}

/// Stock view of one medicine as sent to the provider.
#[derive(Debug, Serialize)]
struct StockLine<'a> {
    name: &'a str,
    stock: i64,
    expiry: NaiveDate,
}

/// Requests insights from a provider with a bounded wait.
#[derive(Debug, Clone)]
pub struct InsightGateway<P> {
    provider: P,
    timeout: Duration,
}

impl<P: InsightProvider> InsightGateway<P> {
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Asks for insights about `sales` and `medicines`.
    ///
    /// The prompt is built before the returned future is first polled, so
    /// the borrowed collections are free to change while the request is in
    /// flight. Resolves to an empty list on any failure.
    pub fn get_insights<'a>(
        &'a self,
        sales: &[Sale],
        medicines: &[Medicine],
    ) -> impl Future<Output = Vec<Insight>> + use<'a, P> {
        let prompt = build_prompt(sales, medicines);
        async move {
            let result = match prompt {
                Ok(prompt) => self.request(&prompt).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(insights) => {
                    info!(count = insights.len(), "insights received");
                    insights
                }
                Err(e) => {
                    warn!(error = %e, "insight request failed");
                    Vec::new()
                }
            }
        }
    }

    async fn request(&self, prompt: &str) -> Result<Vec<Insight>, InsightError> {
        let text = tokio::time::timeout(self.timeout, self.provider.summarize(prompt))
            .await
            .map_err(|_| InsightError::Timeout(self.timeout.as_secs()))??;
        parse_insights(&text)
    }
}

/// Builds the instruction with the newest sales and a stock projection.
///
/// # Errors
/// Returns `Parse` if the data cannot be serialized.
pub fn build_prompt(sales: &[Sale], medicines: &[Medicine]) -> Result<String, InsightError> {
    let mut recent: Vec<&Sale> = sales.iter().collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(SALES_SAMPLE_SIZE);

    let stock: Vec<StockLine<'_>> = medicines
        .iter()
        .map(|m| StockLine {
            name: &m.name,
            stock: m.stock,
            expiry: m.expiry_date,
        })
        .collect();

    let sales_json = serde_json::to_string(&recent)
        .map_err(|e| InsightError::Parse(format!("Failed to serialize sales: {e}")))?;
    let stock_json = serde_json::to_string(&stock)
        .map_err(|e| InsightError::Parse(format!("Failed to serialize inventory: {e}")))?;

    Ok(format!(
        "Analyze the following pharmacy sales and inventory data to provide business \
         insights for a clinic/pharmacy owner.\n\n\
         Sales Data Summary: {sales_json}\n\
         Inventory Data Summary: {stock_json}\n\n\
         Identify:\n\
         1. Demand forecasting (which medicines will likely run out soon).\n\
         2. Dead stock (medicines not selling).\n\
         3. Expiry risk alerts.\n\
         4. Revenue optimization suggestions.\n"
    ))
}

/// Parses the model's reply as a JSON array of insights.
///
/// Any deviation from the expected shape rejects the whole reply.
///
/// # Errors
/// Returns `Parse` for malformed JSON, unknown fields or type tags, missing
/// fields, or a non-finite confidence.
pub fn parse_insights(text: &str) -> Result<Vec<Insight>, InsightError> {
    let insights: Vec<Insight> = serde_json::from_str(text.trim())
        .map_err(|e| InsightError::Parse(format!("Failed to parse insights: {e}")))?;
    if let Some(bad) = insights.iter().find(|i| !i.confidence.is_finite()) {
        return Err(InsightError::Parse(format!(
            "non-finite confidence in insight {:?}",
            bad.title
        )));
    }
    Ok(insights)
}
