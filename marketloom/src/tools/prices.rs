//! Recent price lookup tool for the chat workflow.
//!
//! Fetches daily close prices for a symbol and formats them as a short table
//! the model can quote from. The live provider hits the Yahoo Finance chart
//! endpoint; a static provider serves tests and offline demos.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde_json::{json, Value};

use crate::tools::{Tool, ToolContext, ToolError, ToolOutcome, ToolSpec};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// One daily close.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Price backend seam.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn recent_prices(&self, symbol: &str, days: u32) -> Result<Vec<PriceBar>, ToolError>;
}

/// Live provider over the Yahoo Finance chart endpoint.
pub struct HttpPriceProvider {
    client: reqwest::Client,
}

impl HttpPriceProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpPriceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for HttpPriceProvider {
    async fn recent_prices(&self, symbol: &str, days: u32) -> Result<Vec<PriceBar>, ToolError> {
        let url = format!("{}/{}", CHART_URL, symbol);
        let body: Value = self
            .client
            .get(&url)
            .query(&[("range", format!("{}d", days)), ("interval", "1d".into())])
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;

        let result = &body["chart"]["result"][0];
        let timestamps = result["timestamp"].as_array().cloned().unwrap_or_default();
        let closes = result["indicators"]["quote"][0]["close"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let bars = timestamps
            .iter()
            .zip(closes.iter())
            .filter_map(|(ts, close)| {
                let ts = ts.as_i64()?;
                let close = close.as_f64()?;
                let date = DateTime::from_timestamp(ts, 0)?.date_naive();
                Some(PriceBar { date, close })
            })
            .collect();
        Ok(bars)
    }
}

/// Fixed-price provider for tests and offline demos.
#[derive(Default)]
pub struct StaticPriceProvider {
    bars: Vec<PriceBar>,
}

impl StaticPriceProvider {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }
}

#[async_trait]
impl PriceProvider for StaticPriceProvider {
    async fn recent_prices(&self, _symbol: &str, days: u32) -> Result<Vec<PriceBar>, ToolError> {
        Ok(self.bars.iter().take(days as usize).cloned().collect())
    }
}

/// The `get_recent_prices` tool.
pub struct PricesTool {
    provider: Arc<dyn PriceProvider>,
    days: u32,
}

impl PricesTool {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        Self { provider, days: 5 }
    }
}

#[async_trait]
impl Tool for PricesTool {
    fn name(&self) -> &str {
        "get_recent_prices"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "get_recent_prices".to_string(),
            description: Some(
                "Look up recent daily closing prices for a stock symbol.".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "symbol": {
                        "type": "string",
                        "description": "Stock symbol, e.g. AAPL"
                    }
                },
                "required": ["symbol"]
            }),
        }
    }

    async fn call(&self, args: Value, _ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
        let symbol = args["symbol"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("symbol must be a string".into()))?;

        let bars = self.provider.recent_prices(symbol, self.days).await?;
        if bars.is_empty() {
            return Ok(ToolOutcome::response(format!(
                "No recent price data found for {}.",
                symbol
            )));
        }

        let mut table = format!("Recent closing prices for {}:\n", symbol);
        for bar in &bars {
            table.push_str(&format!("{}: {:.2}\n", bar.date, bar.close));
        }
        Ok(ToolOutcome::response(table))
    }
}
