//! Merchant-based spending category suggestions.

use crate::models::purchase::Category;

/// Keyword vocabularies, checked in order. Matching is a case-insensitive
/// substring test, so the first vocabulary with any hit wins.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &["restaurant", "cafe", "food", "dominos", "zomato", "swiggy"],
    ),
    (Category::Transport, &["uber", "ola", "taxi", "cab"]),
    (
        Category::Groceries,
        &[
            "grocer",
            "grocery",
            "supermarket",
            "reliance",
            "big bazaar",
            "dmart",
            "jio mart",
            "spencer",
        ],
    ),
    (
        Category::Entertainment,
        &["movie", "bookmyshow", "cinema", "ticket"],
    ),
    (Category::Rent, &["rent", "house", "apartment"]),
    (
        Category::Utilities,
        &["phone", "mobile", "recharge", "internet", "jio"],
    ),
];

/// Suggest a spending category for a merchant name.
pub fn infer_category(merchant: &str) -> Option<Category> {
    if merchant.is_empty() {
        return None;
    }

    let lower = merchant.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
}
