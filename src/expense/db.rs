//! Database operations for expenses.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    expense::{Expense, ExpenseId, NewExpense, PaymentMode},
    user::UserID,
};

pub(super) const EXPENSE_COLUMNS: &str =
    "id, amount, category_id, payment_mode, paid_by, date, time, description";

/// Record a new expense.
///
/// The category and payer are checked when the expense is created. They are
/// not foreign keys, so deleting a category or user later leaves its expenses
/// in place.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if `category_id` does not refer to a category,
/// - [Error::InvalidUser] if `paid_by` does not refer to a user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let category_exists: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM category WHERE id = ?1)",
        [new_expense.category_id],
        |row| row.get(0),
    )?;

    if !category_exists {
        return Err(Error::InvalidCategory(new_expense.category_id));
    }

    let user_exists: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM user WHERE id = ?1)",
        [new_expense.paid_by.as_i64()],
        |row| row.get(0),
    )?;

    if !user_exists {
        return Err(Error::InvalidUser(new_expense.paid_by));
    }

    connection
        .prepare(&format!(
            "INSERT INTO expense (amount, category_id, payment_mode, paid_by, date, time, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            (
                new_expense.amount,
                new_expense.category_id,
                new_expense.payment_mode.as_ref(),
                new_expense.paid_by.as_i64(),
                new_expense.date,
                &new_expense.time,
                &new_expense.description,
            ),
            map_expense_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no expense with `id`.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| error.into())
}

/// Retrieve every expense, oldest first.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense ORDER BY date ASC, time ASC, id ASC"
        ))?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Delete an expense by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingExpense] if the expense doesn't exist.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Initialize the expense table and indexes.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            category_id INTEGER NOT NULL,
            payment_mode TEXT NOT NULL,
            paid_by INTEGER NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            description TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
    )?;

    Ok(())
}

pub(super) fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let raw_payment_mode: String = row.get(3)?;

    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category_id: row.get(2)?,
        payment_mode: PaymentMode::new_unchecked(&raw_payment_mode),
        paid_by: UserID::new(row.get(4)?),
        date: row.get(5)?,
        time: row.get(6)?,
        description: row.get(7)?,
    })
}
