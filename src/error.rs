//! Defines the crate level error type and its conversion from SQL errors.

use crate::{category::CategoryId, user::UserID};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An empty string was used as a username.
    #[error("username cannot be empty")]
    EmptyUsername,

    /// The specified username already exists in the database.
    #[error("the username \"{0}\" already exists")]
    DuplicateUsername(String),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The specified category name already exists in the database.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// An empty string was used as a payment mode.
    #[error("payment mode cannot be empty")]
    EmptyPaymentMode,

    /// An empty string was used to name a shopping list item.
    #[error("item name cannot be empty")]
    EmptyItemName,

    /// The category ID used to create an expense did not match a category.
    #[error("the category ID {0} does not refer to a valid category")]
    InvalidCategory(CategoryId),

    /// The user ID used to create an expense or item did not match a user.
    #[error("the user ID {0} does not refer to a valid user")]
    InvalidUser(UserID),

    /// The text could not be parsed as a user role.
    #[error("\"{0}\" is not a valid role, expected \"admin\" or \"user\"")]
    InvalidRole(String),

    /// The text could not be parsed as a shopping list priority.
    #[error("\"{0}\" is not a valid priority, expected \"low\", \"medium\" or \"high\"")]
    InvalidPriority(String),

    /// The text could not be parsed as a reporting period.
    #[error("\"{0}\" is not a valid period, expected \"day\", \"week\", \"month\" or \"year\"")]
    InvalidPeriod(String),

    /// The text could not be parsed as a trend granularity.
    #[error("\"{0}\" is not a valid granularity, expected \"daily\", \"monthly\" or \"yearly\"")]
    InvalidGranularity(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A data snapshot could not be parsed.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not parse the data snapshot: {0}")]
    InvalidSnapshot(String),

    /// Tried to delete a user that does not exist
    #[error("tried to delete a user that is not in the database")]
    DeleteMissingUser,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// Tried to delete a shopping list item that does not exist
    #[error("tried to delete a shopping list item that is not in the database")]
    DeleteMissingItem,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// Whether `error` is a failed UNIQUE constraint.
pub(crate) fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        )
    )
}

/// Whether `error` is a failed FOREIGN KEY constraint.
pub(crate) fn is_foreign_key_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        )
    )
}
