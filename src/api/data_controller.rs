use std::fmt::Display;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{OhlcRecord, validate_series};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::Chart;
use super::host::HostContainer;

impl<H: HostContainer, R: Renderer> Chart<H, R> {
    /// Replaces the whole series.
    ///
    /// The records must be valid and strictly increasing by timestamp; on
    /// error the previous series stays in place and nothing is redrawn.
    pub fn update_data(&mut self, records: Vec<OhlcRecord>) -> ChartResult<()> {
        if let Err(err) = validate_series(&records) {
            warn!(error = %err, count = records.len(), "rejected data update");
            return Err(err);
        }
        debug!(
            previous = self.data.len(),
            count = records.len(),
            "data replaced"
        );
        self.data = Arc::from(records);
        self.invalidate_layout();
        self.schedule_draw();
        Ok(())
    }

    /// Applies the outcome of a provider fetch. A failed fetch means "no
    /// update": it is logged and the current series is kept.
    pub fn apply_fetch_result<E: Display>(
        &mut self,
        result: Result<Vec<OhlcRecord>, E>,
    ) -> ChartResult<()> {
        match result {
            Ok(records) => self.update_data(records),
            Err(err) => {
                warn!(error = %err, kept = self.data.len(), "data fetch failed");
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn data(&self) -> &[OhlcRecord] {
        &self.data
    }

    /// Shared handle on the current series snapshot.
    #[must_use]
    pub fn data_snapshot(&self) -> Arc<[OhlcRecord]> {
        Arc::clone(&self.data)
    }

    /// Record under a hovered or crosshair index, for tooltip views.
    #[must_use]
    pub fn hovered_record(&self, index: Option<usize>) -> Option<&OhlcRecord> {
        index.and_then(|index| self.data.get(index))
    }
}
