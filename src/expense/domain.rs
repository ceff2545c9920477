//! Core expense domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, amount::deserialize_amount, category::CategoryId, database_id::DatabaseID,
    user::UserID,
};

/// Database identifier for an expense.
pub type ExpenseId = DatabaseID;

/// How an expense was paid for, e.g. "cash", "card" or "digital".
///
/// The set of payment modes is open, whatever the household records is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub struct PaymentMode(String);

impl PaymentMode {
    /// Create a payment mode.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyPaymentMode] if `mode` is blank.
    pub fn new(mode: &str) -> Result<Self, Error> {
        let mode = mode.trim();

        if mode.is_empty() {
            Err(Error::EmptyPaymentMode)
        } else {
            Ok(Self(mode.to_owned()))
        }
    }

    /// Create a payment mode without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(mode: &str) -> Self {
        Self(mode.to_owned())
    }
}

impl AsRef<str> for PaymentMode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PaymentMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMode::new(s)
    }
}

impl Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money spent on behalf of the household.
///
/// Expenses are loaded wholesale and treated as read-only snapshots by the
/// aggregations in [crate::analytics].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// The amount spent. Text amounts are coerced, see [crate::amount].
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// The category the expense belongs to. May refer to a deleted category.
    #[serde(alias = "categoryId")]
    pub category_id: CategoryId,
    #[serde(alias = "paymentMode")]
    pub payment_mode: PaymentMode,
    /// The household member who paid.
    #[serde(alias = "paidBy")]
    pub paid_by: UserID,
    /// The local calendar date the money was spent on.
    pub date: Date,
    /// The wall-clock time of day, e.g. "14:30". Informational only.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The data needed to record a new expense.
///
/// To create a new `NewExpense`, use [NewExpense::new].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category_id: CategoryId,
    pub payment_mode: PaymentMode,
    pub paid_by: UserID,
    pub date: Date,
    pub time: String,
    pub description: Option<String>,
}

impl NewExpense {
    /// Start a new expense paid at midday with no description.
    pub fn new(
        amount: f64,
        category_id: CategoryId,
        payment_mode: PaymentMode,
        paid_by: UserID,
        date: Date,
    ) -> Self {
        Self {
            amount,
            category_id,
            payment_mode,
            paid_by,
            date,
            time: "12:00".to_owned(),
            description: None,
        }
    }

    /// Set the time of day for the expense.
    pub fn time(mut self, time: &str) -> Self {
        self.time = time.to_owned();
        self
    }

    /// Set the description for the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }
}
