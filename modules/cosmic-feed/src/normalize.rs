//! Raw feed payload → date groups of [`NeoRecord`]s.
//!
//! Objects that fail to decode are dropped individually; their group is still
//! emitted, so a date can legitimately end up with no records.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use cosmic_common::{DateGroup, NeoRecord};
use neows_client::{FeedResponse, RawNeo, API_DATE_FORMAT};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("object does not match the feed schema: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("object {id} has no close-approach data")]
    NoCloseApproach { id: String },

    #[error("object {id} has an invalid {field}: {value:?}")]
    BadNumber {
        id: String,
        field: &'static str,
        value: String,
    },
}

/// Convert a whole feed page. Groups come back sorted ascending by date.
pub fn normalize_feed(feed: FeedResponse) -> Vec<DateGroup> {
    let mut groups = Vec::with_capacity(feed.near_earth_objects.len());

    for (key, objects) in feed.near_earth_objects {
        let date = match NaiveDate::parse_from_str(&key, API_DATE_FORMAT) {
            Ok(d) => d,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Skipping feed entry with malformed date key");
                continue;
            }
        };

        let neos = objects
            .into_iter()
            .filter_map(|raw| match normalize_neo(raw, date) {
                Ok(neo) => Some(neo),
                Err(e) => {
                    warn!(%date, error = %e, "Dropping unparseable NEO");
                    None
                }
            })
            .collect();

        groups.push(DateGroup { date, neos });
    }

    // Keys iterate lexically; order by parsed date.
    groups.sort_by_key(|g| g.date);
    groups
}

/// Convert one raw object. `group_date` is used when the approach entry has
/// no usable date of its own.
pub fn normalize_neo(
    raw: serde_json::Value,
    group_date: NaiveDate,
) -> Result<NeoRecord, NormalizeError> {
    let neo: RawNeo = serde_json::from_value(raw)?;

    let approach = neo
        .close_approach_data
        .into_iter()
        .next()
        .ok_or_else(|| NormalizeError::NoCloseApproach { id: neo.id.clone() })?;

    let diameter = neo.estimated_diameter.kilometers;
    let estimated_diameter_km =
        (diameter.estimated_diameter_min + diameter.estimated_diameter_max) / 2.0;
    if !estimated_diameter_km.is_finite() || estimated_diameter_km < 0.0 {
        return Err(NormalizeError::BadNumber {
            id: neo.id,
            field: "estimated_diameter",
            value: estimated_diameter_km.to_string(),
        });
    }

    let velocity_kmh = parse_measure(
        &neo.id,
        "relative_velocity",
        &approach.relative_velocity.kilometers_per_hour,
    )?;
    let miss_distance_km =
        parse_measure(&neo.id, "miss_distance", &approach.miss_distance.kilometers)?;

    let close_approach_date = approach
        .close_approach_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, API_DATE_FORMAT).ok())
        .unwrap_or(group_date);

    Ok(NeoRecord {
        id: neo.id,
        name: neo.name,
        is_hazardous: neo.is_potentially_hazardous_asteroid.unwrap_or(false),
        estimated_diameter_km,
        velocity_kmh,
        miss_distance_km,
        close_approach_date,
        close_approach_full: approach.close_approach_date_full,
        orbiting_body: approach.orbiting_body,
        jpl_url: neo.nasa_jpl_url,
        absolute_magnitude: neo.absolute_magnitude_h,
    })
}

fn parse_measure(id: &str, field: &'static str, value: &str) -> Result<f64, NormalizeError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(NormalizeError::BadNumber {
            id: id.to_string(),
            field,
            value: value.to_string(),
        }),
    }
}
