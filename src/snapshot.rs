//! The in-memory collections the aggregations work on.
//!
//! A snapshot is loaded wholesale, either from the database or from the JSON
//! payloads the household API returns, and replaced on the next refresh.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{Category, get_all_categories},
    expense::{Expense, get_all_expenses},
    user::{User, get_all_users},
};

/// Everything needed to compute the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    /// Parse a snapshot from JSON shaped like `{"users": [..], "categories": [..], "expenses": [..]}`.
    ///
    /// # Errors
    /// Returns [Error::InvalidSnapshot] if the JSON is malformed or a record is
    /// missing a required field or has a malformed date.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|error| Error::InvalidSnapshot(error.to_string()))
    }

    /// Load every user, category and expense from the database.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if an SQL related error occurred.
    pub fn load(connection: &Connection) -> Result<Self, Error> {
        let snapshot = Self {
            users: get_all_users(connection)?,
            categories: get_all_categories(connection)?,
            expenses: get_all_expenses(connection)?,
        };

        tracing::debug!(
            "loaded {} users, {} categories and {} expenses",
            snapshot.users.len(),
            snapshot.categories.len(),
            snapshot.expenses.len()
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        category::{CategoryName, create_category},
        db::initialize,
        expense::{NewExpense, PaymentMode, create_expense},
        user::{NewUser, UserID, create_user},
    };

    use super::Snapshot;

    #[test]
    fn parses_api_payloads() {
        let snapshot = Snapshot::from_json(
            r##"{
                "users": [{"id": 1, "username": "a", "full_name": "A", "role": "admin"}],
                "categories": [{"id": 10, "name": "Food", "color": "#f00"}],
                "expenses": [{"id": 1, "amount": "10.50", "category_id": 10,
                              "payment_mode": "cash", "paid_by": 1,
                              "date": "2024-01-01", "time": "10:00"}]
            }"##,
        )
        .unwrap();

        assert_eq!(snapshot.users.len(), 1);
        assert_eq!(snapshot.categories[0].name.as_ref(), "Food");
        assert_eq!(snapshot.expenses[0].amount, 10.5);
        assert_eq!(snapshot.expenses[0].paid_by, UserID::new(1));
    }

    #[test]
    fn missing_collections_are_empty() {
        assert_eq!(Snapshot::from_json("{}"), Ok(Snapshot::default()));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = Snapshot::from_json("{\"users\": [");

        assert!(matches!(result, Err(Error::InvalidSnapshot(_))));
    }

    #[test]
    fn loads_from_database() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user(NewUser::new("a", "A"), &conn).unwrap();
        let category = create_category(CategoryName::new_unchecked("Food"), "#f00", &conn).unwrap();
        let expense = create_expense(
            NewExpense::new(
                20.0,
                category.id,
                PaymentMode::new_unchecked("card"),
                user.id,
                date!(2024 - 01 - 01),
            ),
            &conn,
        )
        .unwrap();

        let snapshot = Snapshot::load(&conn).unwrap();

        assert_eq!(snapshot.users, vec![user]);
        assert_eq!(snapshot.categories, vec![category]);
        assert_eq!(snapshot.expenses, vec![expense]);
    }
}
