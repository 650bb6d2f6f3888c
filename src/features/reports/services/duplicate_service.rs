use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::reports::models::{Report, ReportCategory};
use crate::features::reports::store::{DuplicateWindow, ReportStore};
use crate::shared::constants::{DUPLICATE_RADIUS_DEGREES, DUPLICATE_WINDOW_HOURS};

/// Detects likely duplicate reports before intake persists a new one.
///
/// Two reports are considered duplicates when they share a category, the
/// existing one was created within the last 24 hours, and both coordinates
/// differ by at most 0.001 degrees (roughly 100m). The box is flat in
/// degrees, not geodesic, which is acceptable at this radius.
pub struct DuplicateDetector {
    reports: Arc<dyn ReportStore>,
}

impl DuplicateDetector {
    pub fn new(reports: Arc<dyn ReportStore>) -> Self {
        Self { reports }
    }

    /// Build the window for a candidate submission at `now`
    pub fn window_for(
        category: ReportCategory,
        latitude: f64,
        longitude: f64,
        now: DateTime<Utc>,
    ) -> DuplicateWindow {
        DuplicateWindow {
            category,
            since: now - Duration::hours(DUPLICATE_WINDOW_HOURS),
            lat_min: latitude - DUPLICATE_RADIUS_DEGREES,
            lat_max: latitude + DUPLICATE_RADIUS_DEGREES,
            lon_min: longitude - DUPLICATE_RADIUS_DEGREES,
            lon_max: longitude + DUPLICATE_RADIUS_DEGREES,
        }
    }

    /// First matching report inside the window, if any.
    ///
    /// The check happens before the new report is persisted, so two
    /// concurrent submissions of the same issue can both pass. That race is
    /// accepted; the window only has to catch the common case.
    pub async fn find_duplicate(
        &self,
        category: ReportCategory,
        latitude: f64,
        longitude: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<Report>> {
        let window = Self::window_for(category, latitude, longitude, now);
        let matches = self.reports.find_in_window(&window).await?;
        Ok(matches.into_iter().next())
    }
}
