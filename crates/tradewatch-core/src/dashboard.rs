//! Pagination controller: the dashboard's fetch state machine.
//!
//! The controller is a synchronous state machine; the async plumbing around it
//! lives in [`crate::DashboardService`]. Every fetch is tagged with a
//! monotonically increasing token and only the newest token's resolution is
//! applied, so out-of-order provider responses can never corrupt displayed
//! state.

use serde::Serialize;
use tracing::debug;

use tradewatch_types::{DashboardData, FilterState, FilterType};

/// Dashboard load state. Never left in `Loading` by any resolution path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Error { message: String },
}

/// A fetch the controller decided to issue: its supersede token and the
/// filter state to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub filter: FilterState,
}

#[derive(Debug)]
pub struct DashboardController {
    state: LoadState,
    filter: FilterState,
    data: Option<DashboardData>,
    /// Token of the most recently issued fetch.
    latest_token: u64,
}

impl DashboardController {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: LoadState::Idle,
            filter: FilterState::new(page_size),
            data: None,
            latest_token: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    /// Known page-count bound; 1 until a fetch has been applied.
    pub fn total_pages(&self) -> u32 {
        self.data.as_ref().map_or(1, |d| d.total_pages.max(1))
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest_token += 1;
        self.state = LoadState::Loading;
        debug!(
            target: "tradewatch::dashboard",
            token = self.latest_token,
            filter = self.filter.filter_type.as_str(),
            page = self.filter.page,
            "issuing dashboard fetch"
        );
        FetchTicket {
            token: self.latest_token,
            filter: self.filter,
        }
    }

    /// Switch filters. Resets to page 1 and issues a fetch.
    pub fn request_filter(&mut self, filter_type: FilterType) -> FetchTicket {
        self.filter.filter_type = filter_type;
        self.filter.page = 1;
        self.issue()
    }

    /// Request a page change. Out-of-bounds requests (page 0 or beyond the
    /// known page count) are rejected as no-ops: no state change, no fetch.
    pub fn request_page(&mut self, page: u32) -> Option<FetchTicket> {
        if page < 1 || page > self.total_pages() {
            debug!(target: "tradewatch::dashboard", page, "page request out of bounds, ignoring");
            return None;
        }
        self.filter.page = page;
        Some(self.issue())
    }

    /// Change the page size. Resets to page 1 and issues a fetch.
    pub fn request_page_size(&mut self, page_size: u32) -> FetchTicket {
        self.filter.page_size = page_size.max(1);
        self.filter.page = 1;
        self.issue()
    }

    /// Re-fetch the current filter state (cache invalidation after a command,
    /// or the retry affordance on the error panel).
    pub fn request_refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Apply a successful fetch. Returns false (and changes nothing) when the
    /// token has been superseded by a later request.
    pub fn apply_success(&mut self, token: u64, data: DashboardData) -> bool {
        if token != self.latest_token {
            debug!(target: "tradewatch::dashboard", token, latest = self.latest_token, "discarding stale dashboard result");
            return false;
        }
        // Clamp the page if the fetch shrank the page count.
        let bound = data.total_pages.max(1);
        if self.filter.page > bound {
            self.filter.page = bound;
        }
        self.data = Some(data);
        self.state = LoadState::Ready;
        true
    }

    /// Apply a failed fetch. Stale failures are discarded the same way.
    pub fn apply_failure(&mut self, token: u64, message: String) -> bool {
        if token != self.latest_token {
            return false;
        }
        self.state = LoadState::Error { message };
        true
    }
}
