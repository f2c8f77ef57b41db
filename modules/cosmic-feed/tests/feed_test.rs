//! End-to-end accumulator behaviour against a scripted feed source.
//! No network: MockFeedSource replays canned NeoWs pages.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use cosmic_common::{DateGroup, DateWindow};
use cosmic_feed::testing::{feed_page, neo_json, MockFeedSource};
use cosmic_feed::{filter_hazardous, FeedAccumulator, LoadOutcome, LoadPhase, StaticSession};
use neows_client::FeedResponse;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn signed_in(source: Arc<MockFeedSource>) -> FeedAccumulator {
    let session = StaticSession::from_email(Some("grace@example.com"));
    FeedAccumulator::new(source, Arc::new(session)).with_clock(fixed_today)
}

/// One page per window, each date carrying one object.
fn week_page(start: &str, days: u64, hazardous_every: usize) -> FeedResponse {
    let start = date(start);
    let entries: Vec<(String, Vec<serde_json::Value>)> = (0..=days)
        .map(|i| {
            let d = start + chrono::Duration::days(i as i64);
            let id = format!("{}-{i}", d.format("%Y%m%d"));
            let hazardous = hazardous_every > 0 && (i as usize) % hazardous_every == 0;
            (d.to_string(), vec![neo_json(&id, hazardous)])
        })
        .collect();
    let borrowed: Vec<(&str, Vec<serde_json::Value>)> = entries
        .iter()
        .map(|(d, o)| (d.as_str(), o.clone()))
        .collect();
    feed_page(&borrowed)
}

fn assert_sorted_unique(groups: &[DateGroup]) {
    for pair in groups.windows(2) {
        assert!(
            pair[0].date < pair[1].date,
            "groups out of order: {} then {}",
            pair[0].date,
            pair[1].date
        );
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scenario_single_hazardous_record() {
    let page: FeedResponse = serde_json::from_value(json!({
        "near_earth_objects": {
            "2024-01-01": [{
                "id": "1",
                "is_potentially_hazardous_asteroid": true,
                "estimated_diameter": {
                    "kilometers": { "estimated_diameter_min": 0.1, "estimated_diameter_max": 0.3 }
                },
                "close_approach_data": [{
                    "close_approach_date": "2024-01-01",
                    "close_approach_date_full": "2024-Jan-01",
                    "relative_velocity": { "kilometers_per_hour": "50000" },
                    "miss_distance": { "kilometers": "100000" },
                    "orbiting_body": "Earth"
                }],
                "nasa_jpl_url": "http://x",
                "name": "(2024 AB)"
            }]
        }
    }))
    .unwrap();
    let source = Arc::new(MockFeedSource::new().then_ok(page));
    let mut feed = signed_in(source);

    assert_eq!(feed.load_initial().await, LoadOutcome::Loaded { dates: 1 });

    let groups = feed.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].date, date("2024-01-01"));
    assert_eq!(groups[0].neos.len(), 1);
    assert_eq!(groups[0].neos[0].diameter_label(), "0.200");
    assert!(groups[0].neos[0].is_hazardous);
    assert_eq!(groups[0].neos[0].display_name(), "2024 AB");
}

#[tokio::test]
async fn load_more_before_initial_is_a_no_op() {
    let source = Arc::new(MockFeedSource::new().then_ok(week_page("2024-01-01", 7, 0)));
    let mut feed = signed_in(source.clone());

    assert_eq!(feed.load_more().await, LoadOutcome::Skipped);
    assert!(source.requests().is_empty());
    assert!(feed.groups().is_empty());
    assert_eq!(feed.phase(), LoadPhase::Idle);
    assert!(feed.error().is_none());
}

#[tokio::test]
async fn hazard_filter_over_safe_and_mixed_groups() {
    let page = feed_page(&[
        ("2024-01-01", vec![neo_json("s1", false), neo_json("s2", false)]),
        (
            "2024-01-02",
            vec![neo_json("h1", true), neo_json("s3", false), neo_json("h2", true)],
        ),
    ]);
    let source = Arc::new(MockFeedSource::new().then_ok(page));
    let mut feed = signed_in(source);
    feed.load_initial().await;

    feed.set_only_hazardous(true);
    let visible = feed.visible_groups().into_owned();

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].date, date("2024-01-02"));
    let ids: Vec<_> = visible[0].neos.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["h1", "h2"]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[tokio::test]
async fn paging_only_ever_appends_in_date_order() {
    let source = Arc::new(
        MockFeedSource::new()
            .then_ok(week_page("2024-01-01", 7, 3))
            .then_ok(week_page("2024-01-09", 7, 2))
            .then_err("HTTP error! status: 429")
            .then_ok(week_page("2024-01-17", 7, 0))
            .then_ok(feed_page(&[])),
    );
    let mut feed = signed_in(source.clone());
    feed.load_initial().await;

    let mut previous = feed.groups().to_vec();
    for _ in 0..5 {
        feed.load_more().await;
        let current = feed.groups();
        assert!(current.len() >= previous.len());
        assert_eq!(&current[..previous.len()], previous.as_slice());
        assert_sorted_unique(current);
        previous = current.to_vec();
    }

    assert_eq!(feed.groups().len(), 24);
    assert!(!feed.has_more());
    assert_eq!(feed.frontier(), Some(date("2024-01-24")));

    let windows = source.requests();
    assert_eq!(windows[1], DateWindow::new(date("2024-01-09"), date("2024-01-16")));
    // The failed window is asked for again.
    assert_eq!(windows[2], windows[3]);
    assert_eq!(windows[4], DateWindow::new(date("2024-01-25"), date("2024-02-01")));
}

#[tokio::test]
async fn custom_range_output_is_sorted_without_duplicates() {
    let page = feed_page(&[
        ("2023-03-05", vec![neo_json("c", false)]),
        ("2023-03-01", vec![neo_json("a", true)]),
        ("2023-03-03", vec![neo_json("b", false)]),
    ]);
    let source = Arc::new(MockFeedSource::new().then_ok(page));
    let mut feed = signed_in(source.clone());

    let outcome = feed
        .load_custom_range(Some(date("2023-03-01")), Some(date("2023-03-05")))
        .await;

    assert_eq!(outcome, LoadOutcome::Loaded { dates: 3 });
    assert_sorted_unique(feed.groups());
    assert!(!feed.has_more());
    assert_eq!(source.requests(), vec![DateWindow::new(date("2023-03-01"), date("2023-03-05"))]);
}

#[tokio::test]
async fn filter_round_trip_restores_the_feed() {
    let source = Arc::new(MockFeedSource::new().then_ok(week_page("2024-01-01", 7, 2)));
    let mut feed = signed_in(source);
    feed.load_initial().await;
    let loaded = feed.groups().to_vec();

    let once = filter_hazardous(feed.groups(), true).into_owned();
    let twice = filter_hazardous(&once, true).into_owned();
    assert_eq!(once, twice);

    feed.set_only_hazardous(true);
    assert_eq!(feed.visible_groups().into_owned(), once);
    feed.set_only_hazardous(false);
    assert_eq!(feed.visible_groups().into_owned(), loaded);
    assert_eq!(feed.groups(), loaded.as_slice());
}

#[tokio::test]
async fn zero_dates_ends_paging_and_keeps_groups() {
    let source = Arc::new(
        MockFeedSource::new()
            .then_ok(week_page("2024-01-01", 7, 0))
            .then_ok(FeedResponse::default()),
    );
    let mut feed = signed_in(source);
    feed.load_initial().await;
    let before = feed.feed_state().clone();

    assert_eq!(feed.load_more().await, LoadOutcome::Exhausted);

    assert!(!feed.has_more());
    assert_eq!(feed.groups(), before.groups());
    assert_eq!(feed.frontier(), before.frontier());
    assert!(!feed.can_load_more());
}
