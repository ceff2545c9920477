//! Database operations for users.

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    error::is_unique_violation,
    user::{NewUser, User, UserID},
};

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                full_name TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'user'
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// This function will return a:
/// - [Error::EmptyUsername] if the username is blank,
/// - [Error::DuplicateUsername] if the username is already taken,
/// - or [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    let username = new_user.username.trim();

    if username.is_empty() {
        return Err(Error::EmptyUsername);
    }

    connection
        .prepare(
            "INSERT INTO user (username, full_name, role) VALUES (?1, ?2, ?3)
             RETURNING id, username, full_name, role",
        )?
        .query_row((username, &new_user.full_name, new_user.role), map_row)
        .map_err(|error| {
            if is_unique_violation(&error) {
                Error::DuplicateUsername(username.to_owned())
            } else {
                error.into()
            }
        })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user,
/// - or there was an SQL error.
pub fn get_user(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username, full_name, role FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all users in the order they were registered.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_all_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare("SELECT id, username, full_name, role FROM user ORDER BY id ASC")?
        .query_map([], map_row)?
        .map(|maybe_user| maybe_user.map_err(|error| error.into()))
        .collect()
}

/// Delete a user by ID.
///
/// Expenses the user paid for are kept; they simply no longer match a known
/// household member.
///
/// # Errors
///
/// Returns [Error::DeleteMissingUser] if the user doesn't exist.
pub fn delete_user(user_id: UserID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM user WHERE id = ?1", [user_id.as_i64()])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingUser);
    }

    Ok(())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))?;

    usize::try_from(count).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(error)).into()
    })
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: UserID::new(row.get(0)?),
        username: row.get(1)?,
        full_name: row.get(2)?,
        role: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        user::{NewUser, Role, UserID},
    };

    use super::{count_users, create_user, create_user_table, delete_user, get_all_users, get_user};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_user_table(&conn).unwrap();
        conn
    }

    #[test]
    fn create_user_succeeds() {
        let conn = get_test_connection();

        let user = create_user(NewUser::new("user1", "User One"), &conn).unwrap();

        assert!(user.id.as_i64() > 0);
        assert_eq!(user.username, "user1");
        assert_eq!(user.full_name, "User One");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn create_user_stores_role() {
        let conn = get_test_connection();

        let user = create_user(
            NewUser::new("admin", "Home Admin").role(Role::Admin),
            &conn,
        )
        .unwrap();

        assert_eq!(get_user(user.id, &conn).unwrap().role, Role::Admin);
    }

    #[test]
    fn create_user_fails_on_duplicate_username() {
        let conn = get_test_connection();
        create_user(NewUser::new("user1", "User One"), &conn).unwrap();

        let result = create_user(NewUser::new("user1", "Someone Else"), &conn);

        assert_eq!(result, Err(Error::DuplicateUsername("user1".to_owned())));
    }

    #[test]
    fn create_user_fails_on_blank_username() {
        let conn = get_test_connection();

        let result = create_user(NewUser::new("  ", "Nobody"), &conn);

        assert_eq!(result, Err(Error::EmptyUsername));
    }

    #[test]
    fn get_user_fails_on_missing_id() {
        let conn = get_test_connection();

        assert_eq!(get_user(UserID::new(42), &conn), Err(Error::NotFound));
    }

    #[test]
    fn get_all_users_returns_registration_order() {
        let conn = get_test_connection();
        let first = create_user(NewUser::new("b", "B"), &conn).unwrap();
        let second = create_user(NewUser::new("a", "A"), &conn).unwrap();

        let users = get_all_users(&conn).unwrap();

        assert_eq!(users, vec![first, second]);
        assert_eq!(count_users(&conn).unwrap(), 2);
    }

    #[test]
    fn delete_user_removes_user() {
        let conn = get_test_connection();
        let user = create_user(NewUser::new("user1", "User One"), &conn).unwrap();

        delete_user(user.id, &conn).unwrap();

        assert_eq!(count_users(&conn).unwrap(), 0);
        assert_eq!(delete_user(user.id, &conn), Err(Error::DeleteMissingUser));
    }
}
