//! Spending split by category, payment mode and household member.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    analytics::sum_amounts,
    category::{Category, CategoryId},
    expense::Expense,
    user::{User, UserID},
};

/// The label for expenses whose category no longer exists.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// The color for labels without a color of their own.
pub const FALLBACK_COLOR: &str = "#95a5a6";

/// Colors handed out to payment modes in the order they are first seen.
///
/// Modes seen after the palette runs out share [FALLBACK_COLOR].
pub const PAYMENT_MODE_PALETTE: [&str; 3] = ["#10b981", "#3b82f6", "#f59e0b"];

/// One slice of a breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub total: f64,
    pub color: String,
}

/// Totals keyed by label, kept in the order each label was first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdown {
    entries: Vec<BreakdownEntry>,
}

impl Breakdown {
    /// Add `amount` to the entry for `label`.
    ///
    /// A new entry is colored with `color`, which receives the number of
    /// entries seen before it. Existing entries keep their color.
    fn add(&mut self, label: &str, amount: f64, color: impl FnOnce(usize) -> String) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.label == label) {
            entry.total += amount;
            return;
        }

        let color = color(self.entries.len());
        self.entries.push(BreakdownEntry {
            label: label.to_owned(),
            total: amount,
            color,
        });
    }

    /// The total for `label`, if any expense carried it.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entry(label).map(|entry| entry.total)
    }

    /// The color assigned to `label`.
    pub fn color(&self, label: &str) -> Option<&str> {
        self.entry(label).map(|entry| entry.color.as_str())
    }

    /// The sum of every entry.
    pub fn total(&self) -> f64 {
        self.entries
            .iter()
            .fold(0.0, |total, entry| total + entry.total)
    }

    /// The labels in first-seen order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.label.as_str())
            .collect()
    }

    pub fn entries(&self) -> &[BreakdownEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, label: &str) -> Option<&BreakdownEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }
}

impl IntoIterator for Breakdown {
    type Item = BreakdownEntry;
    type IntoIter = std::vec::IntoIter<BreakdownEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Total `expenses` by category name.
///
/// Expenses whose category is missing from `categories` are grouped under
/// [UNKNOWN_LABEL] with [FALLBACK_COLOR]. Categories that share a name share
/// one entry, colored by whichever of them was seen first.
pub fn group_by_category(expenses: &[Expense], categories: &[Category]) -> Breakdown {
    let categories_by_id: HashMap<CategoryId, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    let mut breakdown = Breakdown::default();

    for expense in expenses {
        match categories_by_id.get(&expense.category_id) {
            Some(category) => breakdown.add(category.name.as_ref(), expense.amount, |_| {
                category.color.clone()
            }),
            None => breakdown.add(UNKNOWN_LABEL, expense.amount, |_| {
                FALLBACK_COLOR.to_owned()
            }),
        }
    }

    tracing::debug!(
        "grouped {} expenses into {} categories",
        expenses.len(),
        breakdown.len()
    );

    breakdown
}

/// Total `expenses` by payment mode, colored from [PAYMENT_MODE_PALETTE].
pub fn group_by_payment_mode(expenses: &[Expense]) -> Breakdown {
    let mut breakdown = Breakdown::default();

    for expense in expenses {
        breakdown.add(expense.payment_mode.as_ref(), expense.amount, |index| {
            PAYMENT_MODE_PALETTE
                .get(index)
                .copied()
                .unwrap_or(FALLBACK_COLOR)
                .to_owned()
        });
    }

    breakdown
}

/// The amount one household member has paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonTotal {
    pub user_id: UserID,
    pub name: String,
    pub total: f64,
}

/// Total `expenses` by payer, one entry per user in the order of `users`.
///
/// Users who paid nothing are kept with a total of zero. Expenses paid by
/// someone not in `users` are left out.
pub fn group_by_person(expenses: &[Expense], users: &[User]) -> Vec<PersonTotal> {
    users
        .iter()
        .map(|user| PersonTotal {
            user_id: user.id,
            name: user.full_name.clone(),
            total: sum_amounts(
                expenses
                    .iter()
                    .filter(|expense| expense.paid_by == user.id),
            ),
        })
        .collect()
}
