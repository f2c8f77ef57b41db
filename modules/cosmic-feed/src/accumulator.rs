//! Date-range feed accumulator.
//!
//! Owns the feed and view state for one front-end instance. Every operation
//! takes `&mut self`, so there is exactly one caller and at most one fetch in
//! flight; the [`LoadPhase`] guard additionally makes re-entry a no-op for
//! front-ends that drive the state from event callbacks.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use cosmic_common::config::DEFAULT_WINDOW_DAYS;
use cosmic_common::{DateGroup, DateWindow, FeedError, LoadScope, NeoRecord};

use crate::filter::{filter_hazardous, FeedSummary};
use crate::normalize::normalize_feed;
use crate::state::{FeedState, LoadPhase, ViewState};
use crate::traits::{FeedSource, Session};

/// What an operation did. Failures are also recorded in the error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fetched and applied this many date groups.
    Loaded { dates: usize },
    /// Fetch succeeded with zero dates; paging is over.
    Exhausted,
    /// Preconditions not met; nothing fetched, nothing changed.
    Skipped,
    /// Input failed validation before any fetch.
    Rejected,
    /// Fetch failed; prior state kept.
    Failed,
}

pub struct FeedAccumulator {
    source: Arc<dyn FeedSource>,
    session: Arc<dyn Session>,
    window_days: u64,
    today: fn() -> NaiveDate,
    feed: FeedState,
    view: ViewState,
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

impl FeedAccumulator {
    pub fn new(source: Arc<dyn FeedSource>, session: Arc<dyn Session>) -> Self {
        Self {
            source,
            session,
            window_days: DEFAULT_WINDOW_DAYS,
            today: utc_today,
            feed: FeedState::default(),
            view: ViewState::default(),
        }
    }

    /// Days added to a window's start date to get its end date.
    pub fn with_window_days(mut self, days: u64) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    // --- Operations ---

    /// Load `[today, today + window]`, replacing whatever is shown.
    /// Idle when nobody is signed in.
    pub async fn load_initial(&mut self) -> LoadOutcome {
        if self.session.current_user().is_none() {
            debug!("No signed-in user, skipping initial load");
            return LoadOutcome::Skipped;
        }
        if !self.view.begin(LoadPhase::Initial) {
            return LoadOutcome::Skipped;
        }

        let window = DateWindow::initial((self.today)(), self.window_days);
        match self.fetch(window, LoadScope::Initial).await {
            Ok(groups) => {
                let dates = groups.len();
                self.feed.replace(groups, window.end, dates > 0);
                self.view.finish(None);
                info!(%window, dates, "Initial feed loaded");
                LoadOutcome::Loaded { dates }
            }
            Err(e) => {
                self.view.finish(Some(e));
                LoadOutcome::Failed
            }
        }
    }

    /// Fetch the window after the frontier and append it.
    pub async fn load_more(&mut self) -> LoadOutcome {
        let Some(frontier) = self.feed.frontier() else {
            return LoadOutcome::Skipped;
        };
        if !self.feed.has_more() || !self.view.begin(LoadPhase::More) {
            return LoadOutcome::Skipped;
        }

        let window = DateWindow::after(frontier, self.window_days);
        match self.fetch(window, LoadScope::More).await {
            Ok(groups) if groups.is_empty() => {
                self.feed.mark_exhausted();
                self.view.finish(None);
                info!(%window, "No more dates upstream");
                LoadOutcome::Exhausted
            }
            Ok(groups) => {
                let dates = self.feed.append(groups, window.end);
                self.view.finish(None);
                info!(%window, dates, total = self.feed.groups().len(), "Appended feed page");
                LoadOutcome::Loaded { dates }
            }
            Err(e) => {
                self.view.finish(Some(e));
                LoadOutcome::Failed
            }
        }
    }

    /// Load exactly `[start, end]`. Paging stays off until the next reset.
    pub async fn load_custom_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> LoadOutcome {
        if self.session.current_user().is_none() {
            debug!("No signed-in user, skipping custom range load");
            return LoadOutcome::Skipped;
        }
        let (Some(start), Some(end)) = (start, end) else {
            self.view.reject(FeedError::Validation(
                "Please select both start and end dates.".to_string(),
            ));
            return LoadOutcome::Rejected;
        };
        if end < start {
            self.view.reject(FeedError::Validation(
                "End date must not be before start date.".to_string(),
            ));
            return LoadOutcome::Rejected;
        }
        if !self.view.begin(LoadPhase::Custom) {
            return LoadOutcome::Skipped;
        }

        let window = DateWindow::new(start, end);
        match self.fetch(window, LoadScope::Custom).await {
            Ok(groups) => {
                let dates = groups.len();
                self.feed.replace(groups, end, false);
                self.view.selecting_range = false;
                self.view.finish(None);
                info!(%window, dates, "Custom range loaded");
                LoadOutcome::Loaded { dates }
            }
            Err(e) => {
                self.view.finish(Some(e));
                LoadOutcome::Failed
            }
        }
    }

    /// Clear filter and selection modes and reload the current week.
    pub async fn reset(&mut self) -> LoadOutcome {
        self.view.clear_modes();
        self.load_initial().await
    }

    /// Re-run whatever can recover the view: the initial load when nothing
    /// is shown yet, otherwise the next page.
    pub async fn retry(&mut self) -> LoadOutcome {
        if self.feed.is_empty() {
            self.load_initial().await
        } else {
            self.load_more().await
        }
    }

    /// Sign out with the provider and drop everything loaded for the user.
    pub async fn sign_out(&mut self) -> anyhow::Result<()> {
        self.session.sign_out().await?;
        self.feed = FeedState::default();
        self.view = ViewState::default();
        Ok(())
    }

    async fn fetch(
        &self,
        window: DateWindow,
        scope: LoadScope,
    ) -> Result<Vec<DateGroup>, FeedError> {
        match self.source.feed(window).await {
            Ok(resp) => Ok(normalize_feed(resp)),
            Err(e) => {
                warn!(%window, %scope, error = %e, "Feed fetch failed");
                Err(FeedError::network(scope, e))
            }
        }
    }

    // --- View modes ---

    pub fn toggle_hazardous(&mut self) -> bool {
        self.view.only_hazardous = !self.view.only_hazardous;
        self.view.only_hazardous
    }

    pub fn set_only_hazardous(&mut self, only_hazardous: bool) {
        self.view.only_hazardous = only_hazardous;
    }

    pub fn toggle_range_selector(&mut self) -> bool {
        self.view.selecting_range = !self.view.selecting_range;
        self.view.selecting_range
    }

    /// Open the detail view for a record. Unknown ids clear the selection.
    pub fn select(&mut self, id: &str) -> Option<&NeoRecord> {
        self.view.selected = self.feed.find(id).map(|n| n.id.clone());
        self.selected()
    }

    pub fn selected(&self) -> Option<&NeoRecord> {
        self.view.selected.as_deref().and_then(|id| self.feed.find(id))
    }

    pub fn clear_selection(&mut self) {
        self.view.selected = None;
    }

    // --- Reads ---

    pub fn groups(&self) -> &[DateGroup] {
        self.feed.groups()
    }

    /// Groups as they should be shown, with the hazard filter applied.
    pub fn visible_groups(&self) -> Cow<'_, [DateGroup]> {
        filter_hazardous(self.feed.groups(), self.view.only_hazardous)
    }

    /// Counts over everything loaded, regardless of the filter.
    pub fn summary(&self) -> FeedSummary {
        FeedSummary::of(self.feed.groups())
    }

    pub fn frontier(&self) -> Option<NaiveDate> {
        self.feed.frontier()
    }

    pub fn has_more(&self) -> bool {
        self.feed.has_more()
    }

    /// Whether a "load more" control should be offered right now.
    pub fn can_load_more(&self) -> bool {
        self.feed.has_more() && !self.view.only_hazardous && !self.view.is_loading()
    }

    pub fn phase(&self) -> LoadPhase {
        self.view.phase
    }

    pub fn error(&self) -> Option<&FeedError> {
        self.view.error.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn feed_state(&self) -> &FeedState {
        &self.feed
    }
}
