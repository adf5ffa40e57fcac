use serde::{Deserialize, Serialize};

/// Row counts reported by one normalization pass.
///
/// Filters run in order (rating first, then coordinates), so
/// `dropped_missing_coordinates` only counts rows that had a rating.
/// Rows the CSV layer could not decode at all are counted separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub dropped_missing_rating: usize,
    pub dropped_missing_coordinates: usize,
    pub dropped_unreadable: usize,
    pub kept: usize,
}

impl LoadStats {
    pub fn dropped(&self) -> usize {
        self.dropped_missing_rating + self.dropped_missing_coordinates + self.dropped_unreadable
    }
}

/// Simple aggregate statistics for the database.
///
/// Returned by [`RestaurantDb::stats`](crate::RestaurantDb::stats); counts
/// reflect the normalized in-memory dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DbStats {
    pub restaurants: usize,
    pub categories: usize,
    pub distinct_titles: usize,
}
