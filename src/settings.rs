//! Household-wide settings stored as key/value pairs.

use rusqlite::{Connection, OptionalExtension, types::Type};
use serde::{Deserialize, Serialize};

use crate::Error;

const CURRENCY_SYMBOL_KEY: &str = "currency_symbol";
const HOME_NAME_KEY: &str = "home_name";

/// Display settings shared by everyone in the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The symbol amounts are displayed with, e.g. "₹".
    pub currency_symbol: String,
    /// The name of the household shown on the dashboard.
    pub home_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_owned(),
            home_name: "Shared Home".to_owned(),
        }
    }
}

/// Create the settings table.
pub fn create_settings_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS setting (
            id INTEGER PRIMARY KEY,
            key TEXT NOT NULL UNIQUE,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Get the household settings.
///
/// Settings that have never been saved fall back to [Settings::default].
///
/// # Errors
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn get_settings(connection: &Connection) -> Result<Settings, Error> {
    let defaults = Settings::default();

    Ok(Settings {
        currency_symbol: get_setting(CURRENCY_SYMBOL_KEY, connection)?
            .unwrap_or(defaults.currency_symbol),
        home_name: get_setting(HOME_NAME_KEY, connection)?.unwrap_or(defaults.home_name),
    })
}

/// Save the household settings, replacing any previous values.
///
/// # Errors
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn update_settings(settings: &Settings, connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    write_settings(settings, &transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Save the household settings without opening a transaction.
///
/// For callers that already hold one.
pub(crate) fn write_settings(settings: &Settings, connection: &Connection) -> Result<(), Error> {
    set_setting(CURRENCY_SYMBOL_KEY, &settings.currency_symbol, connection)?;
    set_setting(HOME_NAME_KEY, &settings.home_name, connection)
}

/// Get the number of saved settings.
pub(crate) fn count_settings(connection: &Connection) -> Result<usize, Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM setting;", [], |row| row.get(0))?;

    usize::try_from(count).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(error)).into()
    })
}

fn get_setting(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .query_row("SELECT value FROM setting WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|error| error.into())
}

fn set_setting(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO setting (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}
