//! Expense categories, e.g. 'Groceries' or 'Rent', and the queries for storing them.

mod db;
mod domain;

pub use db::{
    create_category, create_category_table, delete_category, find_category_by_name,
    get_all_categories, get_category,
};
pub use domain::{Category, CategoryId, CategoryName, DEFAULT_CATEGORY_COLOR};
