//! Per-member insight cards comparing who paid what in a period.

use serde::Serialize;
use time::PrimitiveDateTime;

use crate::{
    analytics::{Period, period_total, person_period_total},
    expense::Expense,
    user::{User, UserID},
};

/// One member's spending in a period next to the household's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub user_id: UserID,
    pub name: String,
    pub total: f64,
    /// The member's share of the household total for the period, from 0 to 100.
    pub share_percent: f64,
}

/// Build one insight card per user, in the order of `users`.
///
/// Shares are zero when nobody spent anything in the period.
pub fn insight_cards(
    expenses: &[Expense],
    users: &[User],
    period: Period,
    now: PrimitiveDateTime,
) -> Vec<InsightCard> {
    let household_total = period_total(expenses, period, now);

    users
        .iter()
        .map(|user| {
            let total = person_period_total(expenses, user.id, period, now);
            let share_percent = if household_total > 0.0 {
                total / household_total * 100.0
            } else {
                0.0
            };

            InsightCard {
                user_id: user.id,
                name: user.full_name.clone(),
                total,
                share_percent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        analytics::{
            Period,
            test_utils::{create_test_expense, create_test_user},
        },
        expense::Expense,
        user::UserID,
    };

    use super::insight_cards;

    fn create_paid_expense(amount: f64, date: time::Date, paid_by: i64) -> Expense {
        let mut expense = create_test_expense(amount, date);
        expense.paid_by = UserID::new(paid_by);
        expense
    }

    #[test]
    fn cards_split_period_total_between_members() {
        let now = datetime!(2024-01-10 12:00);
        let users = vec![create_test_user(1, "A"), create_test_user(2, "B")];
        let expenses = vec![
            create_paid_expense(30.0, date!(2024 - 01 - 09), 1),
            create_paid_expense(10.0, date!(2024 - 01 - 10), 2),
            create_paid_expense(500.0, date!(2023 - 12 - 01), 2),
        ];

        let cards = insight_cards(&expenses, &users, Period::Week, now);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "A");
        assert_eq!(cards[0].total, 30.0);
        assert_eq!(cards[0].share_percent, 75.0);
        assert_eq!(cards[1].name, "B");
        assert_eq!(cards[1].total, 10.0);
        assert_eq!(cards[1].share_percent, 25.0);
    }

    #[test]
    fn shares_are_zero_when_nothing_was_spent() {
        let now = datetime!(2024-01-10 12:00);
        let users = vec![create_test_user(1, "A")];
        let expenses = vec![create_paid_expense(30.0, date!(2020 - 01 - 01), 1)];

        let cards = insight_cards(&expenses, &users, Period::Month, now);

        assert_eq!(cards[0].total, 0.0);
        assert_eq!(cards[0].share_percent, 0.0);
    }
}
