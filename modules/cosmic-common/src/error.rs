//! Errors surfaced through the feed's current-error slot.

use std::fmt;

use thiserror::Error;

/// Which load operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadScope {
    Initial,
    More,
    Custom,
}

impl fmt::Display for LoadScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadScope::Initial => write!(f, "initial"),
            LoadScope::More => write!(f, "more"),
            LoadScope::Custom => write!(f, "custom"),
        }
    }
}

/// Recoverable failures of feed operations. None of these leave state changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// Fetch threw or the upstream answered with a non-2xx status
    #[error("{scope} load failed: {detail}")]
    Network { scope: LoadScope, detail: String },

    /// Operation rejected before any fetch
    #[error("validation error: {0}")]
    Validation(String),
}

impl FeedError {
    pub fn network(scope: LoadScope, err: impl fmt::Display) -> Self {
        FeedError::Network {
            scope,
            detail: err.to_string(),
        }
    }

    /// The message shown to the user; transport details stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            FeedError::Network { scope, .. } => match scope {
                LoadScope::Initial => "Failed to fetch NEO data. Please try again later.",
                LoadScope::More => "Failed to load more data. Please try again.",
                LoadScope::Custom => {
                    "Failed to fetch data for the selected date range. Please try again."
                }
            },
            FeedError::Validation(msg) => msg,
        }
    }

    pub fn scope(&self) -> Option<LoadScope> {
        match self {
            FeedError::Network { scope, .. } => Some(*scope),
            FeedError::Validation(_) => None,
        }
    }
}
