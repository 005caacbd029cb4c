use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::OhlcRecord;

/// Candle period requested from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KlinePeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Parameters of one history request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    pub symbol: String,
    #[serde(default)]
    pub period: KlinePeriod,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl FetchRequest {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            period: KlinePeriod::Daily,
            start_date: None,
            end_date: None,
        }
    }

    #[must_use]
    pub fn with_period(mut self, period: KlinePeriod) -> Self {
        self.period = period;
        self
    }

    #[must_use]
    pub fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }
}

/// Source of OHLC history.
///
/// Implementations return records sorted ascending by timestamp; retries,
/// caching and symbol normalization are their business. The chart never
/// awaits a provider itself: the host awaits `fetch` and hands the outcome
/// to [`super::Chart::apply_fetch_result`].
pub trait DataProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<Vec<OhlcRecord>, Self::Error>> + Send;
}
