use std::{error::Error, fs, path::PathBuf};

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sharehouse_rs::{
    Snapshot,
    analytics::{
        Breakdown, DashboardTotals, Granularity, Period, group_by_category,
        group_by_payment_mode, group_by_person, insight_cards, trend_series,
    },
    currency::format_currency,
    initialize_db,
    settings::{Settings, get_settings},
    timezone::local_now,
};

/// Print the household dashboard for a sharehouse database or JSON snapshot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, conflicts_with = "snapshot", required_unless_present = "snapshot")]
    db_path: Option<PathBuf>,

    /// File path to a JSON snapshot with `users`, `categories` and `expenses`.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// The canonical timezone of the household, e.g. "Asia/Kolkata".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// The period for the insight cards: day, week, month or year.
    #[arg(long, default_value_t = Period::Month)]
    period: Period,

    /// The bucket width of the trend: daily, monthly or yearly.
    #[arg(long, default_value_t = Granularity::Monthly)]
    granularity: Granularity,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let (snapshot, settings) = load_household(&args)?;

    let now = local_now(&args.timezone)?;
    let symbol = settings.currency_symbol.as_str();
    let expenses = snapshot.expenses.as_slice();

    println!("{} ({now})", settings.home_name);
    println!();

    let totals = DashboardTotals::compute(expenses, now);
    println!("Summary");
    println!("  Today       {}", format_currency(totals.today, symbol));
    println!("  This week   {}", format_currency(totals.this_week, symbol));
    println!("  This month  {}", format_currency(totals.this_month, symbol));
    println!("  This year   {}", format_currency(totals.this_year, symbol));
    println!("  Expenses    {}", totals.expense_count);
    println!();

    println!("Trend ({})", args.granularity);
    for point in trend_series(expenses, args.granularity) {
        println!("  {:<12}{}", point.key, format_currency(point.total, symbol));
    }
    println!();

    print_breakdown(
        "By category",
        &group_by_category(expenses, &snapshot.categories),
        symbol,
    );
    print_breakdown("By payment mode", &group_by_payment_mode(expenses), symbol);

    println!("By person");
    for person in group_by_person(expenses, &snapshot.users) {
        println!(
            "  {:<20}{}",
            person.name,
            format_currency(person.total, symbol)
        );
    }
    println!();

    println!("Insights ({})", args.period);
    for card in insight_cards(expenses, &snapshot.users, args.period, now) {
        println!(
            "  {:<20}{:>14} {:>5.1}%",
            card.name,
            format_currency(card.total, symbol),
            card.share_percent
        );
    }

    Ok(())
}

/// Read the household from the database or snapshot named in `args`.
///
/// A database path that does not exist is an error rather than a new, empty
/// household.
fn load_household(args: &Args) -> Result<(Snapshot, Settings), Box<dyn Error>> {
    match (&args.db_path, &args.snapshot) {
        (Some(db_path), _) => {
            if !db_path.is_file() {
                return Err(format!("no database found at {}", db_path.display()).into());
            }

            tracing::info!("reading household from {}", db_path.display());
            let conn = Connection::open(db_path)?;
            initialize_db(&conn)?;

            Ok((Snapshot::load(&conn)?, get_settings(&conn)?))
        }
        (None, Some(snapshot_path)) => {
            tracing::info!("reading snapshot from {}", snapshot_path.display());
            let json = fs::read_to_string(snapshot_path)?;

            Ok((Snapshot::from_json(&json)?, Settings::default()))
        }
        (None, None) => Err("either --db-path or --snapshot is required".into()),
    }
}

fn print_breakdown(title: &str, breakdown: &Breakdown, symbol: &str) {
    println!("{title}");

    if breakdown.is_empty() {
        println!("  (no expenses)");
    }

    for entry in breakdown.entries() {
        println!(
            "  {:<20}{:>14}  {}",
            entry.label,
            format_currency(entry.total, symbol),
            entry.color
        );
    }

    println!();
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr),
        )
        .init();
}
