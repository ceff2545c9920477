//! The household dashboard aggregations.
//!
//! Every function here is pure: it borrows a snapshot of the household's
//! records, never mutates them and never reads the clock. Callers resolve the
//! current local time once (see [crate::timezone::local_now]) and pass it in.

mod breakdown;
mod insights;
mod period;
mod trend;

pub use breakdown::{
    Breakdown, BreakdownEntry, FALLBACK_COLOR, PAYMENT_MODE_PALETTE, PersonTotal, UNKNOWN_LABEL,
    group_by_category, group_by_payment_mode, group_by_person,
};
pub use insights::{InsightCard, insight_cards};
pub use period::{DashboardTotals, Period, period_total, person_period_total};
pub use trend::{Granularity, TrendPoint, trend_series};

use crate::expense::Expense;

/// Add up the amounts of `expenses`.
///
/// Starts from positive zero so that an empty selection sums to `0.0`.
fn sum_amounts<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> f64 {
    expenses
        .into_iter()
        .fold(0.0, |total, expense| total + expense.amount)
}
