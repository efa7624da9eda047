//! Stats resolution: fill in whatever the provider left out.
//!
//! Counts always cover the full analyzed population for the active filter
//! scope and are taken from the provider as-is. Percentages (and on older
//! backends the combined count) may be missing; they are derived here once, at
//! the normalization boundary.

use tradewatch_types::{AnalysisRecord, DashboardData, DashboardResponse, Stats, StatsWire};

/// `100 * count / total` rounded to one decimal place; 0 when `total` is 0.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = 100.0 * count as f64 / total as f64;
    (raw * 10.0).round() / 10.0
}

/// Records with two or more simultaneously detected categories. Category
/// counts are not mutually exclusive partitions: a record detected in N
/// categories contributes to each of the N counts and once here.
pub fn combined_count(records: &[AnalysisRecord]) -> u64 {
    records.iter().filter(|r| r.detection_count() >= 2).count() as u64
}

/// Resolve a wire stats block into the canonical [`Stats`].
///
/// `records` is only consulted for the combined-count fallback when the
/// provider omitted it; everything population-level comes from the wire.
pub fn resolve_stats(wire: StatsWire, records: &[AnalysisRecord]) -> Stats {
    let total = wire.total_analyzed;
    let combined = wire.combined_count.unwrap_or_else(|| combined_count(records));
    Stats {
        total_analyzed: total,
        wholesale_count: wire.wholesale_count,
        export_count: wire.export_count,
        exit_count: wire.exit_count,
        price_negotiation_count: wire.price_negotiation_count,
        combined_count: combined,
        wholesale_percentage: wire
            .wholesale_percentage
            .unwrap_or_else(|| percentage(wire.wholesale_count, total)),
        export_percentage: wire
            .export_percentage
            .unwrap_or_else(|| percentage(wire.export_count, total)),
        exit_percentage: wire
            .exit_percentage
            .unwrap_or_else(|| percentage(wire.exit_count, total)),
        price_negotiation_percentage: wire
            .price_negotiation_percentage
            .unwrap_or_else(|| percentage(wire.price_negotiation_count, total)),
        combined_percentage: wire
            .combined_percentage
            .unwrap_or_else(|| percentage(combined, total)),
        fraud_detected: wire.fraud_detected,
        fraud_analyzed: wire.fraud_analyzed,
        // Fraud runs as its own smaller batch; its rate never divides by
        // total_analyzed.
        fraud_detection_rate: wire
            .fraud_detection_rate
            .unwrap_or_else(|| percentage(wire.fraud_detected, wire.fraud_analyzed)),
    }
}

/// Normalize one provider response: canonicalize every record and resolve the
/// stats block. The single place legacy shapes are adapted.
pub fn normalize_dashboard(resp: DashboardResponse) -> DashboardData {
    let results: Vec<AnalysisRecord> = resp
        .results
        .into_iter()
        .map(|wire| wire.into_canonical())
        .collect();
    let stats = resolve_stats(resp.stats, &results);
    DashboardData {
        stats,
        total_stored_chats: resp.total_stored_chats,
        unanalyzed_chats: resp.unanalyzed_chats,
        results,
        current_page: resp.current_page,
        total_pages: resp.total_pages,
        total_filtered_results: resp.total_filtered_results,
    }
}
