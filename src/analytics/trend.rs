//! Time series of spending for the trend chart.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, expense::Expense};

/// The width of each bucket in a trend series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar date, keyed `YYYY-MM-DD`.
    Daily,
    /// One bucket per calendar month, keyed `YYYY-MM`.
    #[default]
    Monthly,
    /// One bucket per calendar year, keyed `YYYY`.
    Yearly,
}

impl Granularity {
    /// The bucket key for an expense dated `date`.
    ///
    /// Keys are zero padded so that sorting them as text sorts them by date.
    pub fn bucket_key(self, date: Date) -> String {
        match self {
            Granularity::Daily => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            Granularity::Monthly => format!("{:04}-{:02}", date.year(), u8::from(date.month())),
            Granularity::Yearly => format!("{:04}", date.year()),
        }
    }

    /// The lowercase name used on the command line and over the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "monthly" => Ok(Granularity::Monthly),
            "yearly" => Ok(Granularity::Yearly),
            _ => Err(Error::InvalidGranularity(s.to_owned())),
        }
    }
}

/// The total spent in one bucket of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub key: String,
    pub total: f64,
}

/// Total `expenses` per bucket, in ascending key order.
///
/// Only buckets that contain at least one expense are returned.
pub fn trend_series(expenses: &[Expense], granularity: Granularity) -> Vec<TrendPoint> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();

    for expense in expenses {
        *totals
            .entry(granularity.bucket_key(expense.date))
            .or_insert(0.0) += expense.amount;
    }

    tracing::debug!(
        "bucketed {} expenses into {} {granularity} points",
        expenses.len(),
        totals.len()
    );

    totals
        .into_iter()
        .map(|(key, total)| TrendPoint { key, total })
        .collect()
}
