//! Filter taxonomy primitives for the result list.

use serde::{Deserialize, Serialize};

/// The closed set of result filters. One tab per detection category plus
/// `All` (everything analyzed) and `Combined` (two or more categories at once).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    #[default]
    All,
    Wholesale,
    Export,
    Exit,
    PriceNegotiation,
    Fraud,
    Combined,
}

impl FilterType {
    /// All filters in display order.
    pub const ALL: [FilterType; 7] = [
        FilterType::All,
        FilterType::Wholesale,
        FilterType::Export,
        FilterType::Exit,
        FilterType::PriceNegotiation,
        FilterType::Fraud,
        FilterType::Combined,
    ];

    /// Wire value sent to the upstream provider.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::All => "all",
            FilterType::Wholesale => "wholesale",
            FilterType::Export => "export",
            FilterType::Exit => "exit",
            FilterType::PriceNegotiation => "price_negotiation",
            FilterType::Fraud => "fraud",
            FilterType::Combined => "combined",
        }
    }
}

/// The dashboard's current fetch parameters. Changing any field invalidates the
/// displayed page and triggers a re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub filter_type: FilterType,
    pub page: u32,
    pub page_size: u32,
}

impl FilterState {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter_type: FilterType::All,
            page: 1,
            page_size,
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_wire_values() {
        for filter in FilterType::ALL {
            let json = serde_json::to_string(&filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter.as_str()));
        }
    }

    #[test]
    fn test_filter_type_round_trip() {
        let parsed: FilterType = serde_json::from_str("\"price_negotiation\"").unwrap();
        assert_eq!(parsed, FilterType::PriceNegotiation);
    }

    #[test]
    fn test_default_filter_state() {
        let state = FilterState::default();
        assert_eq!(state.filter_type, FilterType::All);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 25);
    }
}
