use std::borrow::Cow;

use chrono::NaiveDate;
use serde::Serialize;

use cosmic_common::DateGroup;

/// Project the feed down to hazardous objects.
///
/// With `only_hazardous` false the input is borrowed untouched. Otherwise each
/// group keeps only its hazardous records and groups left empty are dropped.
pub fn filter_hazardous(groups: &[DateGroup], only_hazardous: bool) -> Cow<'_, [DateGroup]> {
    if !only_hazardous {
        return Cow::Borrowed(groups);
    }

    let filtered = groups
        .iter()
        .filter_map(|group| {
            let neos: Vec<_> = group.neos.iter().filter(|n| n.is_hazardous).cloned().collect();
            (!neos.is_empty()).then(|| DateGroup {
                date: group.date,
                neos,
            })
        })
        .collect();

    Cow::Owned(filtered)
}

/// Headline counts over a set of date groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedSummary {
    pub hazardous: usize,
    pub safe: usize,
    pub total_events: usize,
    pub days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl FeedSummary {
    pub fn of(groups: &[DateGroup]) -> Self {
        let hazardous: usize = groups.iter().map(DateGroup::hazardous_count).sum();
        let total_events: usize = groups.iter().map(|g| g.neos.len()).sum();
        Self {
            hazardous,
            safe: total_events - hazardous,
            total_events,
            days: groups.len(),
            first_date: groups.first().map(|g| g.date),
            last_date: groups.last().map(|g| g.date),
        }
    }

    pub fn has_hazardous(&self) -> bool {
        self.hazardous > 0
    }
}
