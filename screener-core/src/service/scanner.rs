use futures_util::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::spawn;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::{Hit, ScanConfig, ScanReport};
use crate::errors::{ScreenerError, Unavailable};
use crate::indicators::{compute, ensure_min_history};
use crate::signal::{classify_latest, Signal};
use crate::source::DataSource;
use screener_common::{Instrument, Series};

/// Classifies the latest bar of every symbol in a universe
pub struct ScannerService {
    source: Arc<dyn DataSource>,
    config: ScanConfig,
}

impl ScannerService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            config: ScanConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every instrument. Per-symbol failures land in `skipped`; the scan itself never fails.
    pub async fn scan(&self, instruments: &[Instrument]) -> ScanReport {
        let started = Instant::now();
        info!(
            "Scanning {} symbols with up to {} concurrent fetches",
            instruments.len(),
            self.config.max_concurrency
        );

        let permits = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut tasks = FuturesUnordered::new();

        for instrument in instruments {
            let source = Arc::clone(&self.source);
            let permits = Arc::clone(&permits);
            let instrument = instrument.clone();
            let lookback_days = self.config.lookback_days;

            let handle = spawn(async move {
                let outcome = match permits.acquire_owned().await {
                    Ok(_permit) => {
                        Self::scan_symbol(source.as_ref(), &instrument, lookback_days).await
                    }
                    Err(e) => Err(ScreenerError::Task(e.to_string())),
                };
                (instrument, outcome)
            });
            tasks.push(handle);
        }

        let mut report = ScanReport::default();
        let mut task_failures = 0usize;

        while let Some(joined) = tasks.next().await {
            match joined {
                Ok((instrument, Ok(Some(hit)))) => {
                    debug!("{} {}: {}", instrument.code, instrument.name, hit.setup_label);
                    report.push(hit);
                }
                Ok((_, Ok(None))) => {}
                Ok((instrument, Err(e))) => {
                    warn!("Skipping {} ({}): {}", instrument.code, instrument.name, e);
                    report.skip(instrument.code, e);
                }
                Err(e) => {
                    // Task panicked or was cancelled; its symbol is unknown here
                    task_failures += 1;
                    warn!("Scan task failed: {}", e);
                    report.skip("?", ScreenerError::Task(e.to_string()));
                }
            }
        }

        report.sort();
        info!(
            "Scan finished in {:?}: {} pullback, {} breakout, {} skipped",
            started.elapsed(),
            report.pullback.len(),
            report.breakout.len(),
            report.skipped.len()
        );
        if task_failures > 0 {
            warn!("{} scan tasks did not complete", task_failures);
        }

        report
    }

    async fn scan_symbol(
        source: &dyn DataSource,
        instrument: &Instrument,
        lookback_days: u32,
    ) -> Result<Option<Hit>, ScreenerError> {
        let series = source
            .get_daily_series(&instrument.code, lookback_days)
            .await
            .map_err(|e| {
                ScreenerError::unavailable(&instrument.code, Unavailable::Fetch(e.to_string()))
            })?;

        Self::evaluate(instrument, &series)
    }

    /// Classify the last bar of an already fetched series
    pub fn evaluate(
        instrument: &Instrument,
        series: &Series,
    ) -> Result<Option<Hit>, ScreenerError> {
        ensure_min_history(series)?;
        let rows = compute(series)?;

        Ok(match classify_latest(&rows)? {
            Signal::NoSignal => None,
            signal => signal
                .kind()
                .zip(signal.levels().copied())
                .map(|(kind, levels)| Hit::new(instrument, kind, levels)),
        })
    }
}
