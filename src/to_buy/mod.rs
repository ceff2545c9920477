//! The household shopping list.
//!
//! Items are added with a target date and priority. Marking an item as
//! purchased records who bought it and also books the purchase as an expense.

mod db;
mod domain;

pub use db::{
    PURCHASE_CATEGORY_COLOR, PURCHASE_CATEGORY_NAME, create_to_buy_item, create_to_buy_item_table,
    delete_to_buy_item, get_to_buy_item, get_to_buy_items, mark_purchased,
};
pub use domain::{NewToBuyItem, Priority, Purchase, ToBuyItem, ToBuyItemId};
