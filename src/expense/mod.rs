//! Expenses paid by household members and the queries for storing and listing them.

mod db;
mod domain;
mod query;

pub use db::{create_expense, create_expense_table, delete_expense, get_all_expenses, get_expense};
pub use domain::{Expense, ExpenseId, NewExpense, PaymentMode};
pub use query::{ExpenseQuery, query_expenses};
