use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

// --- NEO records ---

/// One close-approach observation, normalized from the upstream feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    pub is_hazardous: bool,
    /// Mean of the upstream min/max estimate, in kilometres.
    pub estimated_diameter_km: f64,
    pub velocity_kmh: f64,
    pub miss_distance_km: f64,
    pub close_approach_date: NaiveDate,
    pub close_approach_full: Option<String>,
    pub orbiting_body: Option<String>,
    pub jpl_url: Option<String>,
    pub absolute_magnitude: Option<f64>,
}

impl NeoRecord {
    /// Upstream names come wrapped in parentheses, e.g. `(2024 AB)`.
    pub fn display_name(&self) -> String {
        self.name.replace(['(', ')'], "")
    }

    pub fn diameter_label(&self) -> String {
        format!("{:.3}", self.estimated_diameter_km)
    }

    pub fn velocity_label(&self) -> String {
        format!("{:.2}", self.velocity_kmh)
    }

    pub fn miss_distance_label(&self) -> String {
        format!("{:.2}", self.miss_distance_km)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_hazardous {
            "HAZARDOUS"
        } else {
            "SAFE"
        }
    }
}

/// All records approaching on one calendar date, in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub neos: Vec<NeoRecord>,
}

impl DateGroup {
    pub fn hazardous_count(&self) -> usize {
        self.neos.iter().filter(|n| n.is_hazardous).count()
    }

    pub fn safe_count(&self) -> usize {
        self.neos.len() - self.hazardous_count()
    }
}

// --- Date windows ---

/// Inclusive calendar range requested from the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `[today, today + days]`.
    pub fn initial(today: NaiveDate, days: u64) -> Self {
        Self {
            start: today,
            end: add_days(today, days),
        }
    }

    /// The window following `frontier`: `[frontier + 1, frontier + 1 + days]`.
    pub fn after(frontier: NaiveDate, days: u64) -> Self {
        let start = add_days(frontier, 1);
        Self {
            start,
            end: add_days(start, days),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

// --- Auth ---

/// The signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}
