use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_millis, decimal_to_f64, millis_to_datetime};
use crate::error::{ChartError, ChartResult};

/// One candlestick record.
///
/// `timestamp_ms` is the exchange-local trading day mapped to UTC
/// milliseconds. Optional fields are carried through for tooltip/legend
/// consumers and are never required by the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OhlcRecord {
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover_rate: Option<f64>,
}

impl OhlcRecord {
    /// Builds a validated record from raw floating values.
    ///
    /// Invariants:
    /// - all prices are finite
    /// - `low <= high`
    /// - `open` and `close` lie within `[low, high]`
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        let record = Self {
            timestamp_ms,
            open,
            high,
            low,
            close,
            symbol: None,
            volume: None,
            turnover: None,
            amplitude: None,
            change_percent: None,
            change_amount: None,
            turnover_rate: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// Converts strongly typed temporal/decimal input into a validated record.
    pub fn from_decimal(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_millis(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
        {
            return Err(ChartError::InvalidData(format!(
                "ohlc values must be finite (timestamp {})",
                self.timestamp_ms
            )));
        }
        if self.low > self.high {
            return Err(ChartError::InvalidData(format!(
                "ohlc low must be <= high (timestamp {})",
                self.timestamp_ms
            )));
        }
        if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            return Err(ChartError::InvalidData(format!(
                "ohlc open/close must be within low/high range (timestamp {})",
                self.timestamp_ms
            )));
        }
        if let Some(volume) = self.volume
            && (!volume.is_finite() || volume < 0.0)
        {
            return Err(ChartError::InvalidData(format!(
                "volume must be finite and >= 0 (timestamp {})",
                self.timestamp_ms
            )));
        }
        Ok(())
    }

    /// Returns `true` when close is greater than or equal to open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.timestamp_ms)
    }

    #[must_use]
    pub fn volume_or_zero(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }
}

/// Validates a whole series: every record individually plus strictly
/// increasing timestamps.
pub fn validate_series(records: &[OhlcRecord]) -> ChartResult<()> {
    for record in records {
        record.validate()?;
    }
    for pair in records.windows(2) {
        if pair[1].timestamp_ms <= pair[0].timestamp_ms {
            return Err(ChartError::InvalidData(format!(
                "timestamps must be strictly increasing ({} follows {})",
                pair[1].timestamp_ms, pair[0].timestamp_ms
            )));
        }
    }
    Ok(())
}
