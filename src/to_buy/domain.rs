//! Core shopping list domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::DatabaseID, expense::PaymentMode, user::UserID};

/// Database identifier for a shopping list item.
pub type ToBuyItemId = DatabaseID;

/// How urgently an item needs to be bought.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(Error::InvalidPriority(other.to_owned())),
        }
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An entry on the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToBuyItem {
    pub id: ToBuyItemId,
    pub name: String,
    pub quantity: Option<String>,
    /// The date the item should be bought by.
    pub target_date: Date,
    pub priority: Priority,
    pub notes: Option<String>,
    pub created_by: UserID,
    pub purchased: bool,
    pub purchased_by: Option<UserID>,
    pub purchase_amount: Option<f64>,
    pub purchase_payment_mode: Option<PaymentMode>,
    pub purchase_date: Option<Date>,
}

/// The data needed to put a new item on the shopping list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewToBuyItem {
    pub name: String,
    pub quantity: Option<String>,
    pub target_date: Date,
    pub priority: Priority,
    pub notes: Option<String>,
    pub created_by: UserID,
}

impl NewToBuyItem {
    /// Start a new medium priority item with no quantity or notes.
    pub fn new(name: &str, target_date: Date, created_by: UserID) -> Self {
        Self {
            name: name.to_owned(),
            quantity: None,
            target_date,
            priority: Priority::default(),
            notes: None,
            created_by,
        }
    }

    pub fn quantity(mut self, quantity: &str) -> Self {
        self.quantity = Some(quantity.to_owned());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_owned());
        self
    }
}

/// The details recorded when an item is bought.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub purchased_by: UserID,
    pub amount: f64,
    pub payment_mode: PaymentMode,
    pub date: Date,
}
