//! Derived analytics - pure, stateless functions over the in-memory
//! transaction and goal lists.
//!
//! Nothing here caches: results are recomputed on every render, which is
//! acceptable at expected data volumes.

mod analytics_model;
mod analytics_service;

pub use analytics_model::{AnalyticsSummary, MonthlySeries, TransactionFilter};
pub use analytics_service::{
    balance, category_totals, filter_transactions, health_score, monthly_series,
    monthly_series_to_date, partition_archived, sort_goals_for_display, summarize, total_expenses,
    total_income,
};
