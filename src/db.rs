//! Creating the application database and filling it with the household defaults.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    category::{CategoryName, create_category, create_category_table, get_all_categories},
    expense::create_expense_table,
    settings::{Settings, count_settings, create_settings_table, write_settings},
    to_buy::create_to_buy_item_table,
    user::{NewUser, Role, count_users, create_user, create_user_table},
};

/// The members created for a fresh household.
const DEFAULT_USERS: [(&str, &str, Role); 3] = [
    ("admin", "Home Admin", Role::Admin),
    ("user1", "User One", Role::User),
    ("user2", "User Two", Role::User),
];

/// The categories created for a fresh household.
const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("Groceries", "#22c55e"),
    ("Rent", "#3b82f6"),
    ("Utilities", "#f97316"),
    ("Transportation", "#8b5cf6"),
    ("Entertainment", "#ec4899"),
];

/// Create all application tables if they do not exist yet.
///
/// Also turns on foreign key enforcement for `connection`.
///
/// # Errors
/// Returns [Error::SqlError] if any table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_category_table(&transaction)?;
    create_expense_table(&transaction)?;
    create_to_buy_item_table(&transaction)?;
    create_settings_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Fill empty tables with the default members, categories and settings.
///
/// Each group is only added when its table is empty, so calling this on an
/// existing household changes nothing.
///
/// # Errors
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn seed_defaults(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    if count_users(&transaction)? == 0 {
        tracing::info!("adding the default household members");

        for (username, full_name, role) in DEFAULT_USERS {
            create_user(NewUser::new(username, full_name).role(role), &transaction)?;
        }
    }

    if get_all_categories(&transaction)?.is_empty() {
        tracing::info!("adding the default categories");

        for (name, color) in DEFAULT_CATEGORIES {
            create_category(CategoryName::new_unchecked(name), color, &transaction)?;
        }
    }

    if count_settings(&transaction)? == 0 {
        tracing::info!("saving the default settings");
        write_settings(&Settings::default(), &transaction)?;
    }

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        category::get_all_categories,
        settings::{Settings, get_settings},
        user::{Role, get_all_users},
    };

    use super::{initialize, seed_defaults};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = get_test_connection();

        assert_eq!(initialize(&conn), Ok(()));
    }

    #[test]
    fn seeds_defaults_into_empty_database() {
        let conn = get_test_connection();

        seed_defaults(&conn).unwrap();

        let users = get_all_users(&conn).unwrap();
        let names: Vec<_> = users.iter().map(|user| user.full_name.as_str()).collect();
        assert_eq!(names, ["Home Admin", "User One", "User Two"]);
        assert_eq!(users[0].role, Role::Admin);

        let categories = get_all_categories(&conn).unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0].name.as_ref(), "Groceries");
        assert_eq!(categories[0].color, "#22c55e");

        assert_eq!(get_settings(&conn), Ok(Settings::default()));
    }

    #[test]
    fn seeding_twice_adds_nothing() {
        let conn = get_test_connection();
        seed_defaults(&conn).unwrap();

        seed_defaults(&conn).unwrap();

        assert_eq!(get_all_users(&conn).unwrap().len(), 3);
        assert_eq!(get_all_categories(&conn).unwrap().len(), 5);
    }
}
