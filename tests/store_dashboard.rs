use rusqlite::Connection;
use tempfile::TempDir;
use time::macros::{date, datetime};

use sharehouse_rs::{
    Error, Snapshot,
    analytics::{DashboardTotals, FALLBACK_COLOR, UNKNOWN_LABEL, group_by_category, group_by_person},
    category::{delete_category, get_all_categories},
    expense::{ExpenseQuery, NewExpense, PaymentMode, create_expense, query_expenses},
    initialize_db, seed_defaults,
    settings::get_settings,
    to_buy::{
        NewToBuyItem, PURCHASE_CATEGORY_NAME, Purchase, create_to_buy_item, get_to_buy_items,
        mark_purchased,
    },
    user::get_all_users,
};

fn open_seeded_database(temp: &TempDir) -> Connection {
    let conn = Connection::open(temp.path().join("sharehouse.db")).unwrap();
    initialize_db(&conn).unwrap();
    seed_defaults(&conn).unwrap();
    conn
}

#[test]
fn seeded_database_reopens_with_the_same_household() {
    let temp = TempDir::new().unwrap();
    drop(open_seeded_database(&temp));

    let conn = open_seeded_database(&temp);

    assert_eq!(get_all_users(&conn).unwrap().len(), 3);
    assert_eq!(get_all_categories(&conn).unwrap().len(), 5);
    assert_eq!(get_settings(&conn).unwrap().currency_symbol, "₹");
}

#[test]
fn recorded_expenses_feed_the_dashboard() {
    let temp = TempDir::new().unwrap();
    let conn = open_seeded_database(&temp);
    let users = get_all_users(&conn).unwrap();
    let categories = get_all_categories(&conn).unwrap();
    let groceries = &categories[0];
    let rent = &categories[1];

    for (amount, category_id, paid_by, date) in [
        (120.0, groceries.id, users[1].id, date!(2024 - 01 - 10)),
        (80.0, groceries.id, users[2].id, date!(2024 - 01 - 08)),
        (15000.0, rent.id, users[0].id, date!(2024 - 01 - 01)),
    ] {
        create_expense(
            NewExpense::new(
                amount,
                category_id,
                PaymentMode::new_unchecked("upi"),
                paid_by,
                date,
            ),
            &conn,
        )
        .unwrap();
    }

    let snapshot = Snapshot::load(&conn).unwrap();
    let now = datetime!(2024-01-10 18:00);

    let totals = DashboardTotals::compute(&snapshot.expenses, now);
    assert_eq!(totals.today, 120.0);
    assert_eq!(totals.this_week, 200.0);
    assert_eq!(totals.this_month, 15200.0);

    let by_person = group_by_person(&snapshot.expenses, &snapshot.users);
    let totals_by_name: Vec<_> = by_person
        .iter()
        .map(|person| (person.name.as_str(), person.total))
        .collect();
    assert_eq!(
        totals_by_name,
        vec![("Home Admin", 15000.0), ("User One", 120.0), ("User Two", 80.0)]
    );

    let groceries_only =
        query_expenses(&ExpenseQuery::default().category(groceries.id), &conn).unwrap();
    assert_eq!(groceries_only.len(), 2);
    assert_eq!(groceries_only[0].date, date!(2024 - 01 - 10));
}

#[test]
fn deleted_category_shows_as_unknown() {
    let temp = TempDir::new().unwrap();
    let conn = open_seeded_database(&temp);
    let users = get_all_users(&conn).unwrap();
    let categories = get_all_categories(&conn).unwrap();
    let entertainment = categories.last().unwrap();
    create_expense(
        NewExpense::new(
            300.0,
            entertainment.id,
            PaymentMode::new_unchecked("card"),
            users[0].id,
            date!(2024 - 01 - 05),
        ),
        &conn,
    )
    .unwrap();

    delete_category(entertainment.id, &conn).unwrap();
    let snapshot = Snapshot::load(&conn).unwrap();

    let by_category = group_by_category(&snapshot.expenses, &snapshot.categories);
    assert_eq!(by_category.get(UNKNOWN_LABEL), Some(300.0));
    assert_eq!(by_category.color(UNKNOWN_LABEL), Some(FALLBACK_COLOR));
}

#[test]
fn buying_a_shopping_list_item_books_an_expense() {
    let temp = TempDir::new().unwrap();
    let conn = open_seeded_database(&temp);
    let users = get_all_users(&conn).unwrap();
    let item = create_to_buy_item(
        NewToBuyItem::new("Rice", date!(2024 - 01 - 12), users[1].id),
        &conn,
    )
    .unwrap();

    mark_purchased(
        item.id,
        Purchase {
            purchased_by: users[2].id,
            amount: 640.0,
            payment_mode: PaymentMode::new_unchecked("cash"),
            date: date!(2024 - 01 - 10),
        },
        &conn,
    )
    .unwrap();

    assert!(get_to_buy_items(Some(false), &conn).unwrap().is_empty());

    let snapshot = Snapshot::load(&conn).unwrap();
    let by_category = group_by_category(&snapshot.expenses, &snapshot.categories);
    assert_eq!(by_category.get(PURCHASE_CATEGORY_NAME), Some(640.0));

    let by_person = group_by_person(&snapshot.expenses, &snapshot.users);
    assert_eq!(by_person[2].total, 640.0);
}

#[test]
fn buying_a_missing_item_is_not_found() {
    let temp = TempDir::new().unwrap();
    let conn = open_seeded_database(&temp);
    let users = get_all_users(&conn).unwrap();

    let result = mark_purchased(
        999,
        Purchase {
            purchased_by: users[0].id,
            amount: 1.0,
            payment_mode: PaymentMode::new_unchecked("cash"),
            date: date!(2024 - 01 - 10),
        },
        &conn,
    );

    assert_eq!(result, Err(Error::NotFound));
    assert!(Snapshot::load(&conn).unwrap().expenses.is_empty());
}
