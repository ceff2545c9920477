//! Household members and the queries for storing them.

mod db;
mod domain;

pub use db::{count_users, create_user, create_user_table, delete_user, get_all_users, get_user};
pub use domain::{NewUser, Role, User, UserID};
