//! Shared constants.

/// Decimal places used when rounding derived analytics for display.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Number of trailing calendar months shown by the default reports view.
pub const DEFAULT_REPORT_MONTHS: u32 = 6;

/// Baseline value of the financial health score before adjustments.
pub const HEALTH_SCORE_BASELINE: i32 = 50;
