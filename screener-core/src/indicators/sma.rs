//! Simple moving average over a fixed trailing window

use ta::indicators::SimpleMovingAverage;
use ta::Next;

use crate::errors::ScreenerError;

/// Wraps `ta`'s SMA so that values are only reported once the window is full.
/// `ta` itself averages over whatever it has seen so far.
#[derive(Debug, Clone)]
pub struct Sma {
    inner: SimpleMovingAverage,
    period: usize,
    seen: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, ScreenerError> {
        let inner = SimpleMovingAverage::new(period).map_err(|e| {
            ScreenerError::InvalidInput(format!("SMA period {}: {:?}", period, e))
        })?;

        Ok(Self {
            inner,
            period,
            seen: 0,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Feed the next value; `None` until `period` values have been seen
    pub fn next(&mut self, value: f64) -> Option<f64> {
        let average = self.inner.next(value);
        self.seen += 1;
        if self.seen >= self.period {
            Some(average)
        } else {
            None
        }
    }
}

/// Calculate an SMA over a whole slice, aligned with the input
pub fn calculate_sma(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, ScreenerError> {
    let mut sma = Sma::new(period)?;
    Ok(values.iter().map(|&v| sma.next(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_until_window_full() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let sma = calculate_sma(&values, 3).unwrap();

        assert_eq!(sma[0], None);
        assert_eq!(sma[1], None);
        assert_eq!(sma[2], Some(2.0));
        assert_eq!(sma[3], Some(3.0));
        assert_eq!(sma[5], Some(5.0));
    }

    #[test]
    fn test_trailing_window_only() {
        let values = [100.0, 100.0, 100.0, 400.0];
        let sma = calculate_sma(&values, 2).unwrap();

        assert_eq!(sma[2], Some(100.0));
        assert_eq!(sma[3], Some(250.0));
    }

    #[test]
    fn test_zero_period_is_rejected() {
        assert!(matches!(Sma::new(0), Err(ScreenerError::InvalidInput(_))));
    }
}
