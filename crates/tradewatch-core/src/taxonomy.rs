//! The filter taxonomy: one tab per filter with its label and badge count.
//!
//! Adding a detection category means adding one [`FilterType`] variant, one
//! `Stats` field, and one arm here; the exhaustive match keeps the three in
//! sync at compile time.

use serde::Serialize;
use tradewatch_types::{FilterType, Stats};

/// A renderable filter tab.
#[derive(Debug, Clone, Serialize)]
pub struct FilterTab {
    pub filter: FilterType,
    pub label: &'static str,
    /// Population-level count backing the tab badge.
    pub badge: u64,
}

fn label(filter: FilterType) -> &'static str {
    match filter {
        FilterType::All => "All",
        FilterType::Wholesale => "Wholesale only",
        FilterType::Export => "Export only",
        FilterType::Exit => "Platform exit",
        FilterType::PriceNegotiation => "Price negotiation",
        FilterType::Fraud => "Fraud",
        FilterType::Combined => "Combined",
    }
}

fn badge(filter: FilterType, stats: &Stats) -> u64 {
    match filter {
        FilterType::All => stats.total_analyzed,
        FilterType::Wholesale => stats.wholesale_count,
        FilterType::Export => stats.export_count,
        FilterType::Exit => stats.exit_count,
        FilterType::PriceNegotiation => stats.price_negotiation_count,
        FilterType::Fraud => stats.fraud_detected,
        FilterType::Combined => stats.combined_count,
    }
}

/// All filter tabs in display order, with badge counts read from `stats`.
pub fn filter_tabs(stats: &Stats) -> Vec<FilterTab> {
    FilterType::ALL
        .into_iter()
        .map(|filter| FilterTab {
            filter,
            label: label(filter),
            badge: badge(filter, stats),
        })
        .collect()
}
