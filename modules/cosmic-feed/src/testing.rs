// Test mocks for the feed accumulator.
//
// MockFeedSource (FeedSource) replays scripted responses in order and records
// every window it was asked for. Pair it with StaticSession for auth.
//
// Plus payload builders: neo_json() for one raw object, feed_page() for a
// whole feed response.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::json;

use cosmic_common::DateWindow;
use neows_client::FeedResponse;

use crate::traits::FeedSource;

// ---------------------------------------------------------------------------
// MockFeedSource
// ---------------------------------------------------------------------------

enum Scripted {
    Ok(FeedResponse),
    Err(String),
}

/// Replays scripted responses; errors once the script runs out.
/// Builder pattern: `.then_ok()`, `.then_err()`.
pub struct MockFeedSource {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<DateWindow>>,
}

impl Default for MockFeedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn then_ok(self, page: FeedResponse) -> Self {
        self.push(Scripted::Ok(page));
        self
    }

    pub fn then_err(self, message: &str) -> Self {
        self.push(Scripted::Err(message.to_string()));
        self
    }

    /// Every window requested so far, in call order.
    pub fn requests(&self) -> Vec<DateWindow> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, entry: Scripted) {
        self.script.lock().unwrap().push_back(entry);
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn feed(&self, window: DateWindow) -> Result<FeedResponse> {
        self.requests.lock().unwrap().push(window);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Ok(page)) => Ok(page),
            Some(Scripted::Err(message)) => bail!("{message}"),
            None => bail!("MockFeedSource: no response scripted for {window}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

/// A well-formed raw NEO with a 0.1–0.3 km diameter range.
pub fn neo_json(id: &str, hazardous: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("({id})"),
        "nasa_jpl_url": format!("https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr={id}"),
        "absolute_magnitude_h": 22.1,
        "is_potentially_hazardous_asteroid": hazardous,
        "estimated_diameter": {
            "kilometers": { "estimated_diameter_min": 0.1, "estimated_diameter_max": 0.3 }
        },
        "close_approach_data": [{
            "close_approach_date_full": null,
            "relative_velocity": { "kilometers_per_hour": "50000.5" },
            "miss_distance": { "kilometers": "100000.25" },
            "orbiting_body": "Earth"
        }]
    })
}

/// A feed response with the given `(date, objects)` entries.
pub fn feed_page(entries: &[(&str, Vec<serde_json::Value>)]) -> FeedResponse {
    let near_earth_objects = entries
        .iter()
        .map(|(date, objects)| (date.to_string(), objects.clone()))
        .collect();
    FeedResponse {
        element_count: Some(entries.iter().map(|(_, o)| o.len() as u64).sum()),
        near_earth_objects,
    }
}
