//! Filtered expense listings, newest first.

use rusqlite::{Connection, ToSql, params_from_iter};
use time::Date;

use crate::{
    Error,
    category::CategoryId,
    expense::{
        Expense, PaymentMode,
        db::{EXPENSE_COLUMNS, map_expense_row},
    },
    user::UserID,
};

/// Optional filters for listing expenses.
///
/// Every filter that is `None` matches all expenses. The date range is
/// inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseQuery {
    pub category_id: Option<CategoryId>,
    pub paid_by: Option<UserID>,
    pub payment_mode: Option<PaymentMode>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl ExpenseQuery {
    /// Only include expenses in the category `category_id`.
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Only include expenses paid for by `user_id`.
    pub fn paid_by(mut self, user_id: UserID) -> Self {
        self.paid_by = Some(user_id);
        self
    }

    /// Only include expenses paid with `payment_mode`.
    pub fn payment_mode(mut self, payment_mode: PaymentMode) -> Self {
        self.payment_mode = Some(payment_mode);
        self
    }

    /// Only include expenses on or after `date`.
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Only include expenses on or before `date`.
    pub fn end_date(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(category_id) = self.category_id {
            conditions.push("category_id = ?");
            params.push(Box::new(category_id));
        }

        if let Some(paid_by) = self.paid_by {
            conditions.push("paid_by = ?");
            params.push(Box::new(paid_by.as_i64()));
        }

        if let Some(payment_mode) = &self.payment_mode {
            conditions.push("payment_mode = ?");
            params.push(Box::new(payment_mode.as_ref().to_owned()));
        }

        if let Some(start_date) = self.start_date {
            conditions.push("date >= ?");
            params.push(Box::new(start_date));
        }

        if let Some(end_date) = self.end_date {
            conditions.push("date <= ?");
            params.push(Box::new(end_date));
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

/// List the expenses matching `query`, newest first.
///
/// Expenses on the same date are ordered by time of day, latest first.
///
/// # Errors
/// Returns [Error::SqlError] if the query could not be prepared or executed.
pub fn query_expenses(query: &ExpenseQuery, connection: &Connection) -> Result<Vec<Expense>, Error> {
    let (where_clause, params) = query.where_clause();

    let sql = format!(
        "SELECT {EXPENSE_COLUMNS} FROM expense {where_clause}
         ORDER BY date DESC, time DESC, id DESC"
    );

    tracing::debug!("listing expenses with {query:?}");

    let mut stmt = connection.prepare(&sql)?;
    stmt.query_map(params_from_iter(params.iter()), map_expense_row)?
        .collect::<Result<Vec<Expense>, rusqlite::Error>>()
        .map_err(|error| error.into())
}
