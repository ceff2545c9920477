//! Sharehouse tracks what a shared household spends and who paid for it.
//!
//! This library provides the household's SQLite record store and the
//! aggregations behind its dashboard: period totals, spending trends and
//! breakdowns by category, payment mode and household member.
//!
//! ```no_run
//! use rusqlite::Connection;
//! use sharehouse_rs::{Snapshot, analytics::DashboardTotals, initialize_db, timezone::local_now};
//!
//! # fn main() -> Result<(), sharehouse_rs::Error> {
//! let conn = Connection::open("sharehouse.db")?;
//! initialize_db(&conn)?;
//!
//! let snapshot = Snapshot::load(&conn)?;
//! let totals = DashboardTotals::compute(&snapshot.expenses, local_now("Asia/Kolkata")?);
//! println!("spent {} this month", totals.this_month);
//! # Ok(())
//! # }
//! ```

pub mod amount;
pub mod analytics;
pub mod category;
pub mod currency;
mod database_id;
mod db;
mod error;
pub mod expense;
pub mod settings;
mod snapshot;
pub mod timezone;
pub mod to_buy;
pub mod user;

pub use database_id::DatabaseID;
pub use db::{initialize as initialize_db, seed_defaults};
pub use error::Error;
pub use snapshot::Snapshot;
