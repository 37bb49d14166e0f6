//! Filter + sort projection over the stored page.
//!
//! Recomputed from scratch whenever the inputs change; nothing here is cached.

use super::AssetSummary;
use crate::query::{SortField, SortKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Shown when the filter matches nothing.
pub const EMPTY_MESSAGE: &str = "No matching coins";

/// The filtered, ordered list handed to the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketView {
    pub items: Vec<AssetSummary>,
    pub is_empty: bool,
}

impl MarketView {
    pub fn new(items: Vec<AssetSummary>) -> Self {
        Self {
            is_empty: items.is_empty(),
            items,
        }
    }

    /// Apply filter and sort to `summaries`.
    pub fn project(summaries: &[AssetSummary], filter_text: &str, sort_key: SortKey) -> Self {
        Self::new(apply(summaries, filter_text, sort_key))
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty.then_some(EMPTY_MESSAGE)
    }
}

/// True when `filter_text` occurs in the name or symbol, ignoring case.
pub fn matches(summary: &AssetSummary, filter_text: &str) -> bool {
    if filter_text.is_empty() {
        return true;
    }
    let needle = filter_text.to_lowercase();
    summary.name.to_lowercase().contains(&needle) || summary.symbol.to_lowercase().contains(&needle)
}

fn sort_value(summary: &AssetSummary, field: SortField) -> Option<Decimal> {
    match field {
        SortField::MarketCap => Some(summary.market_cap),
        SortField::CurrentPrice => Some(summary.current_price),
        SortField::PriceChangePct24h => summary.price_change_pct_24h,
    }
}

/// Order two optional keys; missing values sort last in either direction.
fn compare(a: Option<Decimal>, b: Option<Decimal>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter `summaries` by `filter_text` and stable-sort by `sort_key`.
pub fn apply(summaries: &[AssetSummary], filter_text: &str, sort_key: SortKey) -> Vec<AssetSummary> {
    let field = sort_key.field();
    let descending = sort_key.is_descending();

    let mut items: Vec<AssetSummary> = summaries
        .iter()
        .filter(|s| matches(s, filter_text))
        .cloned()
        .collect();

    // `sort_by` is stable: equal keys keep their input order.
    items.sort_by(|a, b| compare(sort_value(a, field), sort_value(b, field), descending));
    items
}
