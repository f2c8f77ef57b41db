//! Feed and view state with their transitions.
//!
//! Everything here is synchronous and side-effect free; the accumulator
//! drives these transitions around each fetch.

use chrono::NaiveDate;
use tracing::warn;

use cosmic_common::{DateGroup, FeedError, NeoRecord};

// ---------------------------------------------------------------------------
// FeedState
// ---------------------------------------------------------------------------

/// Accumulated date groups plus the paging cursor.
///
/// Groups are sorted ascending by date with no duplicate dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    groups: Vec<DateGroup>,
    frontier: Option<NaiveDate>,
    has_more: bool,
}

impl FeedState {
    pub fn groups(&self) -> &[DateGroup] {
        &self.groups
    }

    /// End date of the most recent successful fetch.
    pub fn frontier(&self) -> Option<NaiveDate> {
        self.frontier
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Swap in a freshly loaded feed.
    pub fn replace(&mut self, mut groups: Vec<DateGroup>, frontier: NaiveDate, has_more: bool) {
        groups.sort_by_key(|g| g.date);
        groups.dedup_by_key(|g| g.date);
        self.groups = groups;
        self.frontier = Some(frontier);
        self.has_more = has_more;
    }

    /// Append the next page and advance the frontier. Groups not strictly
    /// after the current last date are dropped. Returns how many were kept.
    pub fn append(&mut self, groups: Vec<DateGroup>, frontier: NaiveDate) -> usize {
        let before = self.groups.len();
        for group in groups {
            match self.groups.last() {
                Some(last) if group.date <= last.date => {
                    warn!(date = %group.date, last = %last.date, "Dropping out-of-order date group");
                }
                _ => self.groups.push(group),
            }
        }
        self.frontier = Some(frontier);
        self.groups.len() - before
    }

    /// The upstream has nothing past the frontier.
    pub fn mark_exhausted(&mut self) {
        self.has_more = false;
    }

    pub fn find(&self, id: &str) -> Option<&NeoRecord> {
        self.groups
            .iter()
            .flat_map(|g| g.neos.iter())
            .find(|n| n.id == id)
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which load, if any, is in flight. Only one can be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Initial,
    More,
    Custom,
}

/// Flags a front-end renders from: loading scope, error slot, filter and
/// selection modes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub phase: LoadPhase,
    pub error: Option<FeedError>,
    pub only_hazardous: bool,
    pub selecting_range: bool,
    pub selected: Option<String>,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.phase != LoadPhase::Idle
    }

    /// Enter a loading phase and clear the error slot. Refuses (returns
    /// false) while another load is in flight.
    pub fn begin(&mut self, phase: LoadPhase) -> bool {
        if self.is_loading() || phase == LoadPhase::Idle {
            return false;
        }
        self.phase = phase;
        self.error = None;
        true
    }

    /// Leave the loading phase, recording the failure if there was one.
    pub fn finish(&mut self, error: Option<FeedError>) {
        self.phase = LoadPhase::Idle;
        self.error = error;
    }

    /// Surface an error without entering a loading phase.
    pub fn reject(&mut self, error: FeedError) {
        self.error = Some(error);
    }

    /// Back to the default week view: filter off, range selector closed,
    /// nothing selected.
    pub fn clear_modes(&mut self) {
        self.only_hazardous = false;
        self.selecting_range = false;
        self.selected = None;
    }
}
