//! Totals over a calendar period relative to the current local time.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::{Error, analytics::sum_amounts, expense::Expense, user::UserID};

const MILLISECONDS_PER_DAY: i128 = 86_400_000;

/// The window used to bucket expenses for the summary cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The same calendar date as now.
    Day,
    /// The trailing seven days ending today, not a calendar week.
    Week,
    /// The same calendar month and year as now.
    #[default]
    Month,
    /// The same calendar year as now.
    Year,
}

impl Period {
    /// Whether an expense dated `date` falls inside this period at `now`.
    pub fn contains(self, date: Date, now: PrimitiveDateTime) -> bool {
        let today = now.date();

        match self {
            Period::Day => date == today,
            Period::Week => matches!(days_since(date, now), 0..=6),
            Period::Month => date.year() == today.year() && date.month() == today.month(),
            Period::Year => date.year() == today.year(),
        }
    }

    /// The lowercase name used on the command line and over the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(Error::InvalidPeriod(s.to_owned())),
        }
    }
}

/// Whole days from local midnight on `date` to `now`, rounded towards negative infinity.
///
/// A date later than today gives a negative number of days.
fn days_since(date: Date, now: PrimitiveDateTime) -> i128 {
    (now - date.midnight())
        .whole_milliseconds()
        .div_euclid(MILLISECONDS_PER_DAY)
}

/// Sum the amounts of the expenses dated inside `period` at `now`.
///
/// An empty slice sums to zero.
pub fn period_total(expenses: &[Expense], period: Period, now: PrimitiveDateTime) -> f64 {
    sum_amounts(
        expenses
            .iter()
            .filter(|expense| period.contains(expense.date, now)),
    )
}

/// Sum the amounts `user_id` paid inside `period` at `now`.
///
/// An unknown user has a total of zero.
pub fn person_period_total(
    expenses: &[Expense],
    user_id: UserID,
    period: Period,
    now: PrimitiveDateTime,
) -> f64 {
    sum_amounts(
        expenses
            .iter()
            .filter(|expense| expense.paid_by == user_id && period.contains(expense.date, now)),
    )
}

/// The figures shown on the dashboard's summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub today: f64,
    pub this_week: f64,
    pub this_month: f64,
    pub this_year: f64,
    /// The number of expenses in the snapshot, regardless of date.
    pub expense_count: usize,
}

impl DashboardTotals {
    /// Compute every period total for `expenses` at `now`.
    pub fn compute(expenses: &[Expense], now: PrimitiveDateTime) -> Self {
        tracing::debug!("computing dashboard totals over {} expenses", expenses.len());

        Self {
            today: period_total(expenses, Period::Day, now),
            this_week: period_total(expenses, Period::Week, now),
            this_month: period_total(expenses, Period::Month, now),
            this_year: period_total(expenses, Period::Year, now),
            expense_count: expenses.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        Error,
        analytics::test_utils::create_test_expense,
        expense::Expense,
        user::UserID,
    };

    use super::{DashboardTotals, Period, days_since, period_total, person_period_total};

    fn paid_by(mut expense: Expense, user_id: i64) -> Expense {
        expense.paid_by = UserID::new(user_id);
        expense
    }

    #[test]
    fn empty_input_sums_to_zero() {
        let now = datetime!(2024-01-10 09:00);

        for period in [Period::Day, Period::Week, Period::Month, Period::Year] {
            let total = period_total(&[], period, now);

            assert_eq!(total, 0.0);
            assert!(total.is_sign_positive(), "{period} total should be +0.0");
        }
    }

    #[test]
    fn day_total_only_counts_today() {
        let now = datetime!(2024-01-10 23:59);
        let expenses = vec![
            create_test_expense(10.0, date!(2024 - 01 - 10)),
            create_test_expense(2.5, date!(2024 - 01 - 10)),
            create_test_expense(100.0, date!(2024 - 01 - 09)),
            create_test_expense(100.0, date!(2024 - 01 - 11)),
        ];

        assert_eq!(period_total(&expenses, Period::Day, now), 12.5);
    }

    #[test]
    fn week_includes_six_days_ago_and_excludes_seven() {
        let now = datetime!(2024-01-10 00:00);
        let expenses = vec![
            create_test_expense(1.0, date!(2024 - 01 - 04)),
            create_test_expense(1000.0, date!(2024 - 01 - 03)),
        ];

        assert_eq!(days_since(date!(2024 - 01 - 04), now), 6);
        assert_eq!(days_since(date!(2024 - 01 - 03), now), 7);
        assert_eq!(period_total(&expenses, Period::Week, now), 1.0);
    }

    #[test]
    fn week_excludes_future_expenses() {
        let now = datetime!(2024-01-10 18:30);
        let expenses = vec![
            create_test_expense(5.0, date!(2024 - 01 - 10)),
            create_test_expense(50.0, date!(2024 - 01 - 11)),
            create_test_expense(500.0, date!(2024 - 02 - 01)),
        ];

        assert_eq!(days_since(date!(2024 - 01 - 11), now), -1);
        assert_eq!(period_total(&expenses, Period::Week, now), 5.0);
    }

    #[test]
    fn week_window_crosses_month_and_year_boundaries() {
        let now = datetime!(2024-01-02 08:00);
        let expenses = vec![
            create_test_expense(3.0, date!(2023 - 12 - 28)),
            create_test_expense(4.0, date!(2024 - 01 - 01)),
            create_test_expense(40.0, date!(2023 - 12 - 26)),
        ];

        assert_eq!(period_total(&expenses, Period::Week, now), 7.0);
    }

    #[test]
    fn month_total_matches_year_and_month() {
        let now = datetime!(2024-03-15 12:00);
        let expenses = vec![
            create_test_expense(1.0, date!(2024 - 03 - 01)),
            create_test_expense(2.0, date!(2024 - 03 - 31)),
            create_test_expense(4.0, date!(2023 - 03 - 15)),
            create_test_expense(8.0, date!(2024 - 02 - 29)),
        ];

        assert_eq!(period_total(&expenses, Period::Month, now), 3.0);
    }

    #[test]
    fn year_total_matches_year() {
        let now = datetime!(2024-03-15 12:00);
        let expenses = vec![
            create_test_expense(1.0, date!(2024 - 01 - 01)),
            create_test_expense(2.0, date!(2024 - 12 - 31)),
            create_test_expense(4.0, date!(2023 - 12 - 31)),
        ];

        assert_eq!(period_total(&expenses, Period::Year, now), 3.0);
    }

    #[test]
    fn person_period_total_only_counts_payer() {
        let now = datetime!(2024-01-10 12:00);
        let expenses = vec![
            paid_by(create_test_expense(10.0, date!(2024 - 01 - 10)), 1),
            paid_by(create_test_expense(20.0, date!(2024 - 01 - 10)), 2),
            paid_by(create_test_expense(40.0, date!(2023 - 01 - 10)), 1),
        ];

        assert_eq!(
            person_period_total(&expenses, UserID::new(1), Period::Year, now),
            10.0
        );
        assert_eq!(
            person_period_total(&expenses, UserID::new(2), Period::Day, now),
            20.0
        );
        assert_eq!(
            person_period_total(&expenses, UserID::new(3), Period::Year, now),
            0.0
        );
    }

    #[test]
    fn dashboard_totals_cover_every_period() {
        let now = datetime!(2024-01-10 12:00);
        let expenses = vec![
            create_test_expense(1.0, date!(2024 - 01 - 10)),
            create_test_expense(2.0, date!(2024 - 01 - 05)),
            create_test_expense(4.0, date!(2024 - 01 - 01)),
            create_test_expense(8.0, date!(2023 - 12 - 31)),
        ];

        let totals = DashboardTotals::compute(&expenses, now);

        assert_eq!(
            totals,
            DashboardTotals {
                today: 1.0,
                this_week: 3.0,
                this_month: 7.0,
                this_year: 7.0,
                expense_count: 4,
            }
        );
    }

    #[test]
    fn period_parses_from_lowercase_names() {
        assert_eq!("week".parse::<Period>(), Ok(Period::Week));
        assert_eq!(" Year ".parse::<Period>(), Ok(Period::Year));
        assert_eq!(
            "fortnight".parse::<Period>(),
            Err(Error::InvalidPeriod("fortnight".to_owned()))
        );
    }

    #[test]
    fn period_serializes_as_lowercase() {
        assert_eq!(serde_json::to_string(&Period::Day).unwrap(), "\"day\"");
        assert_eq!(Period::Month.to_string(), "month");
    }
}
