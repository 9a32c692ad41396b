// =================================================================
// source/yahoo.rs - Yahoo Finance Chart API Implementation
// =================================================================

use async_trait::async_trait;
use screener_common::{Bar, Series};
use std::time::Duration;
use tracing::{debug, warn};

use super::{
    errors::SourceError,
    traits::DataSource,
    types::{ChartData, ChartParams, ChartResponse},
    utils::{build_provider_symbol, local_trading_date, price_to_decimal},
};
use crate::config::SourceSettings;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; swing-screener/0.1)";

/// Daily bars from the Yahoo Finance v8 chart endpoint
pub struct YahooDataSource {
    base_url: String,
    symbol_suffix: String,
    client: reqwest::Client,
}

impl YahooDataSource {
    pub fn new(settings: &SourceSettings) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            symbol_suffix: settings.symbol_suffix.clone(),
            client,
        })
    }

    pub fn with_defaults() -> Result<Self, SourceError> {
        Self::new(&SourceSettings::default())
    }

    async fn fetch_chart(&self, params: &ChartParams) -> Result<String, SourceError> {
        let url = format!("{}/{}", self.base_url, params.symbol);
        debug!("Fetching daily chart: {}", url);

        let response = self.client.get(&url).query(&params.query()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::SymbolNotFound(params.symbol.clone()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl DataSource for YahooDataSource {
    async fn get_daily_series(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Series, SourceError> {
        let provider_symbol = build_provider_symbol(symbol, &self.symbol_suffix)?;
        let params = ChartParams::new(provider_symbol, lookback_days);

        let body = self.fetch_chart(&params).await?;
        parse_chart(symbol, &body)
    }
}

/// Turn a chart response body into a validated series.
///
/// Rows with any missing OHLC field are dropped. Two rows falling on the same
/// local date (the live bar next to the settled one) keep the later row.
pub fn parse_chart(symbol: &str, body: &str) -> Result<Series, SourceError> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        if error.code == "Not Found" {
            return Err(SourceError::SymbolNotFound(symbol.to_string()));
        }
        return Err(SourceError::ApiError(format!(
            "{}: {}",
            error.code, error.description
        )));
    }

    let data = response
        .chart
        .result
        .and_then(|mut results| results.pop())
        .ok_or_else(|| SourceError::SymbolNotFound(symbol.to_string()))?;

    let bars = collect_bars(symbol, &data)?;
    Ok(Series::new(symbol, bars)?)
}

fn collect_bars(symbol: &str, data: &ChartData) -> Result<Vec<Bar>, SourceError> {
    let timestamps = data.timestamp.as_deref().unwrap_or_default();
    let quote = data
        .indicators
        .quote
        .first()
        .ok_or_else(|| SourceError::ParseError("Missing quote block".to_string()))?;

    let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;

    for (i, &ts) in timestamps.iter().enumerate() {
        let field = |column: &[Option<f64>]| column.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(close)) = (
            field(&quote.open),
            field(&quote.high),
            field(&quote.low),
            field(&quote.close),
        ) else {
            dropped += 1;
            continue;
        };
        let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);

        let bar = Bar::new(
            local_trading_date(ts, data.meta.gmtoffset)?,
            price_to_decimal(open)?,
            price_to_decimal(high)?,
            price_to_decimal(low)?,
            price_to_decimal(close)?,
            volume,
        );

        match bars.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => bars.push(bar),
        }
    }

    if dropped > 0 {
        warn!("{}: dropped {} incomplete rows", symbol, dropped);
    }

    Ok(bars)
}
