// ==========================================
// Carga de pedidos - pipeline configuration
// ==========================================
// Holds the knobs of the ingestion pipeline: persistence chunk size
// (clamped), business timezone, and the refrigeration-flag strictness
// toggle. The validator never reads the clock itself; "today" is
// computed here once and injected.
// ==========================================

use chrono::{FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lower bound for the effective persistence chunk size.
pub const MIN_BATCH_SIZE: usize = 500;

/// Upper bound for the effective persistence chunk size.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Business timezone offset in hours (America/Lima, UTC-5, no DST).
///
/// Single global constant: the delivery-date rule is evaluated against
/// "today" in this timezone, never per-request.
pub const BUSINESS_UTC_OFFSET_HOURS: i32 = -5;

/// Configuration for one ingestion pipeline instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Configured persistence chunk size. Clamped into
    /// [MIN_BATCH_SIZE, MAX_BATCH_SIZE] before use.
    pub batch_size: usize,

    /// When true, unrecognized refrigeration-flag text is a row-level
    /// parse error. When false (default, historic behavior) it silently
    /// coerces to `false`.
    pub strict_refrigeracion: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: MIN_BATCH_SIZE,
            strict_refrigeracion: false,
        }
    }
}

impl ImportConfig {
    /// Effective chunk size: the configured value clamped into the
    /// inclusive range [500, 1000], whatever was configured.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE)
    }
}

/// "Today" as a calendar date in the business timezone.
pub fn business_today() -> NaiveDate {
    // east_opt only fails for offsets beyond +-24h
    let offset = FixedOffset::east_opt(BUSINESS_UTC_OFFSET_HOURS * 3600)
        .expect("business offset out of range");
    Utc::now().with_timezone(&offset).date_naive()
}
