//! Database operations for the shopping list.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{CategoryName, create_category, find_category_by_name},
    error::is_foreign_key_violation,
    expense::{Expense, NewExpense, PaymentMode, create_expense},
    to_buy::{NewToBuyItem, Purchase, ToBuyItem, ToBuyItemId},
    user::UserID,
};

/// The category that purchased shopping list items are booked under.
pub const PURCHASE_CATEGORY_NAME: &str = "To-Buy Items";

/// The color used when the purchase category has to be created.
pub const PURCHASE_CATEGORY_COLOR: &str = "#6366f1";

/// The time of day recorded on expenses booked from the shopping list.
const PURCHASE_TIME: &str = "12:00";

const ITEM_COLUMNS: &str = "id, name, quantity, target_date, priority, notes, created_by, \
    purchased, purchased_by, purchase_amount, purchase_payment_mode, purchase_date";

/// Put a new item on the shopping list.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyItemName] if the item name is blank,
/// - [Error::InvalidUser] if `created_by` does not refer to a user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_to_buy_item(
    new_item: NewToBuyItem,
    connection: &Connection,
) -> Result<ToBuyItem, Error> {
    let name = new_item.name.trim();

    if name.is_empty() {
        return Err(Error::EmptyItemName);
    }

    connection
        .prepare(&format!(
            "INSERT INTO to_buy_item (name, quantity, target_date, priority, notes, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {ITEM_COLUMNS}"
        ))?
        .query_row(
            (
                name,
                &new_item.quantity,
                new_item.target_date,
                new_item.priority,
                &new_item.notes,
                new_item.created_by.as_i64(),
            ),
            map_row,
        )
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                Error::InvalidUser(new_item.created_by)
            } else {
                error.into()
            }
        })
}

/// Retrieve a single shopping list item by ID.
pub fn get_to_buy_item(id: ToBuyItemId, connection: &Connection) -> Result<ToBuyItem, Error> {
    connection
        .prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM to_buy_item WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve shopping list items ordered by the date they are needed by.
///
/// `purchased` restricts the list to bought (`Some(true)`) or outstanding
/// (`Some(false)`) items, `None` returns both.
pub fn get_to_buy_items(
    purchased: Option<bool>,
    connection: &Connection,
) -> Result<Vec<ToBuyItem>, Error> {
    let mut stmt = connection.prepare(&format!(
        "SELECT {ITEM_COLUMNS} FROM to_buy_item
         WHERE (?1 IS NULL OR purchased = ?1)
         ORDER BY target_date ASC, id ASC"
    ))?;

    stmt.query_map([purchased], map_row)?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}

/// Mark an item as bought and book the purchase as an expense.
///
/// The expense is filed under the [PURCHASE_CATEGORY_NAME] category, which is
/// created if it does not exist yet. Either everything is saved or nothing is.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if there is no item with `id`,
/// - [Error::InvalidUser] if the purchaser is not a user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn mark_purchased(
    id: ToBuyItemId,
    purchase: Purchase,
    connection: &Connection,
) -> Result<(ToBuyItem, Expense), Error> {
    let transaction = connection.unchecked_transaction()?;

    let name: String = transaction.query_row(
        "SELECT name FROM to_buy_item WHERE id = ?1",
        [id],
        |row| row.get(0),
    )?;

    let category = match find_category_by_name(PURCHASE_CATEGORY_NAME, &transaction)? {
        Some(category) => category,
        None => {
            tracing::info!("creating the \"{PURCHASE_CATEGORY_NAME}\" category");
            create_category(
                CategoryName::new_unchecked(PURCHASE_CATEGORY_NAME),
                PURCHASE_CATEGORY_COLOR,
                &transaction,
            )?
        }
    };

    let expense = create_expense(
        NewExpense::new(
            purchase.amount,
            category.id,
            purchase.payment_mode.clone(),
            purchase.purchased_by,
            purchase.date,
        )
        .time(PURCHASE_TIME)
        .description(&format!("Purchase: {name}")),
        &transaction,
    )?;

    transaction.execute(
        "UPDATE to_buy_item
         SET purchased = 1, purchased_by = ?1, purchase_amount = ?2,
             purchase_payment_mode = ?3, purchase_date = ?4
         WHERE id = ?5",
        (
            purchase.purchased_by.as_i64(),
            purchase.amount,
            purchase.payment_mode.as_ref(),
            purchase.date,
            id,
        ),
    )?;

    let item = get_to_buy_item(id, &transaction)?;

    transaction.commit()?;

    Ok((item, expense))
}

/// Delete a shopping list item by ID.
///
/// Expenses booked for the item when it was purchased are kept.
pub fn delete_to_buy_item(id: ToBuyItemId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM to_buy_item WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingItem);
    }

    Ok(())
}

/// Initialize the shopping list table.
///
/// Requires the user table to exist.
pub fn create_to_buy_item_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS to_buy_item (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            quantity TEXT,
            target_date TEXT NOT NULL,
            priority TEXT NOT NULL DEFAULT 'medium',
            notes TEXT,
            created_by INTEGER NOT NULL,
            purchased INTEGER NOT NULL DEFAULT 0,
            purchased_by INTEGER,
            purchase_amount REAL,
            purchase_payment_mode TEXT,
            purchase_date TEXT,
            FOREIGN KEY(created_by) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(purchased_by) REFERENCES user(id) ON UPDATE CASCADE ON DELETE SET NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<ToBuyItem, rusqlite::Error> {
    let purchased_by: Option<i64> = row.get(8)?;
    let purchase_payment_mode: Option<String> = row.get(10)?;

    Ok(ToBuyItem {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        target_date: row.get(3)?,
        priority: row.get(4)?,
        notes: row.get(5)?,
        created_by: UserID::new(row.get(6)?),
        purchased: row.get(7)?,
        purchased_by: purchased_by.map(UserID::new),
        purchase_amount: row.get(9)?,
        purchase_payment_mode: purchase_payment_mode
            .as_deref()
            .map(PaymentMode::new_unchecked),
        purchase_date: row.get(11)?,
    })
}
