use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::Duration;

use sharehouse_rs::{
    category::get_all_categories,
    expense::{NewExpense, PaymentMode, create_expense},
    initialize_db, seed_defaults,
    timezone::local_now,
    to_buy::{NewToBuyItem, Priority, create_to_buy_item},
    user::get_all_users,
};

/// A utility for creating a test database for sharehouse_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The canonical timezone the sample expenses are dated in.
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,
}

/// Amount, payment mode and days before today for each sample expense.
const SAMPLE_EXPENSES: [(f64, &str, i64); 8] = [
    (450.0, "upi", 0),
    (120.5, "cash", 1),
    (18000.0, "digital", 3),
    (2300.75, "card", 6),
    (89.99, "cash", 9),
    (640.0, "upi", 21),
    (1500.0, "card", 45),
    (320.25, "digital", 400),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let today = local_now(&args.timezone)?.date();

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;
    seed_defaults(&conn)?;

    println!("Creating sample expenses...");

    let users = get_all_users(&conn)?;
    let categories = get_all_categories(&conn)?;

    for (index, (amount, payment_mode, days_ago)) in SAMPLE_EXPENSES.into_iter().enumerate() {
        let user = &users[index % users.len()];
        let category = &categories[index % categories.len()];

        create_expense(
            NewExpense::new(
                amount,
                category.id,
                PaymentMode::new(payment_mode)?,
                user.id,
                today - Duration::days(days_ago),
            )
            .description(&format!("Sample {}", category.name)),
            &conn,
        )?;
    }

    println!("Creating shopping list...");

    create_to_buy_item(
        NewToBuyItem::new("Dish soap", today + Duration::days(2), users[0].id).quantity("2"),
        &conn,
    )?;
    create_to_buy_item(
        NewToBuyItem::new("Light bulbs", today + Duration::days(7), users[1 % users.len()].id)
            .priority(Priority::High)
            .notes("Kitchen and hallway"),
        &conn,
    )?;

    println!("Success!");

    Ok(())
}
