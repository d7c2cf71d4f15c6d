//! The user's watched list and its aggregate statistics

use thiserror::Error;
use tracing::info;

use crate::models::{WatchedEntry, MAX_USER_RATING};

/// Reasons `add` refuses an entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchedError {
    #[error("{0} is already in the watched list")]
    Duplicate(String),

    #[error("Rating must be between 1 and 10, got {0}")]
    InvalidRating(u8),
}

/// Ordered, id-unique collection of watched movies
#[derive(Debug, Clone, Default)]
pub struct WatchedListController {
    entries: Vec<WatchedEntry>,
}

impl WatchedListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`, then run `on_added` (the shell closes the selection there)
    pub fn add<F: FnOnce()>(&mut self, entry: WatchedEntry, on_added: F) -> Result<(), WatchedError> {
        if self.contains(&entry.id) {
            return Err(WatchedError::Duplicate(entry.id));
        }
        if entry.user_rating == 0 || entry.user_rating > MAX_USER_RATING {
            return Err(WatchedError::InvalidRating(entry.user_rating));
        }
        info!(id = %entry.id, rating = entry.user_rating, "marked watched");
        self.entries.push(entry);
        on_added();
        Ok(())
    }

    /// Drop `id` from the list; absent ids are a no-op
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            info!(id, "removed from watched");
        }
        removed
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Rating the user gave `id`, if it is watched
    pub fn user_rating_for(&self, id: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.user_rating)
    }

    pub fn average_imdb_rating(&self) -> f64 {
        average(self.entries.iter().map(|e| f64::from(e.imdb_rating)))
    }

    pub fn average_user_rating(&self) -> f64 {
        average(self.entries.iter().map(|e| f64::from(e.user_rating)))
    }

    pub fn average_runtime(&self) -> f64 {
        average(self.entries.iter().map(|e| f64::from(e.runtime_minutes)))
    }
}

/// Arithmetic mean accumulated as `value / count`; 0.0 for no values
fn average<I>(values: I) -> f64
where
    I: ExactSizeIterator<Item = f64>,
{
    let count = values.len() as f64;
    values.fold(0.0, |acc, v| acc + v / count)
}
