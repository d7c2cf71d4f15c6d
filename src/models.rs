//! Data structures for PopcornTUI
//!
//! Shared models organized by domain:
//! - **Search**: OMDb search summaries
//! - **Detail**: full per-movie snapshot fetched on selection
//! - **Watched**: user-curated entries combining metadata with a personal rating

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest rating a user can give a movie
pub const MAX_USER_RATING: u8 = 10;

// =============================================================================
// Search Models
// =============================================================================

/// One hit from a title search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// IMDb identifier (e.g. "tt1375666")
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} ({})", self.title, self.year)
        }
    }
}

// =============================================================================
// Detail Models
// =============================================================================

/// Detailed movie information from a lookup by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub runtime_minutes: u32,
    pub year: String,
    pub imdb_rating: f32,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Build a watched entry carrying the user's rating
    pub fn to_watched(&self, user_rating: u8) -> WatchedEntry {
        WatchedEntry {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster_url: self.poster_url.clone(),
            imdb_rating: self.imdb_rating,
            runtime_minutes: self.runtime_minutes,
            user_rating,
        }
    }
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} min - ⭐ {:.1}",
            self.title, self.year, self.runtime_minutes, self.imdb_rating
        )
    }
}

// =============================================================================
// Watched Models
// =============================================================================

/// A movie the user marked as watched, with their rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub imdb_rating: f32,
    pub runtime_minutes: u32,
    /// 1..=10
    pub user_rating: u8,
}

impl fmt::Display for WatchedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - ⭐ {:.1} - 🌟 {} - ⏳ {} min",
            self.title, self.imdb_rating, self.user_rating, self.runtime_minutes
        )
    }
}

// =============================================================================
// Wire value parsing
// =============================================================================

/// Parse a runtime like "148 min" into minutes; unknown values become 0
pub fn parse_runtime(raw: &str) -> u32 {
    raw.split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Parse a rating like "8.8"; "N/A" and other junk become 0.0
pub fn parse_rating(raw: &str) -> f32 {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|r| r.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> MovieDetail {
        MovieDetail {
            id: "tt1375666".into(),
            title: "Inception".into(),
            poster_url: "https://example.com/inception.jpg".into(),
            runtime_minutes: 148,
            year: "2010".into(),
            imdb_rating: 8.8,
            plot: "A thief who steals corporate secrets.".into(),
            released: "16 Jul 2010".into(),
            actors: "Leonardo DiCaprio".into(),
            director: "Christopher Nolan".into(),
            genre: "Action, Sci-Fi".into(),
        }
    }

    #[test]
    fn test_summary_display() {
        let summary = MovieSummary {
            id: "tt1".into(),
            title: "Heat".into(),
            year: "1995".into(),
            poster_url: String::new(),
        };
        assert_eq!(summary.to_string(), "Heat (1995)");

        let no_year = MovieSummary {
            year: String::new(),
            ..summary
        };
        assert_eq!(no_year.to_string(), "Heat");
    }

    #[test]
    fn test_detail_to_watched_copies_metadata() {
        let entry = inception().to_watched(9);
        assert_eq!(entry.id, "tt1375666");
        assert_eq!(entry.runtime_minutes, 148);
        assert_eq!(entry.user_rating, 9);
        assert!((entry.imdb_rating - 8.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_runtime() {
        assert_eq!(parse_runtime("148 min"), 148);
        assert_eq!(parse_runtime("90"), 90);
        assert_eq!(parse_runtime("N/A"), 0);
        assert_eq!(parse_runtime(""), 0);
    }

    #[test]
    fn test_parse_rating() {
        assert!((parse_rating("8.8") - 8.8).abs() < f32::EPSILON);
        assert_eq!(parse_rating("N/A"), 0.0);
        assert_eq!(parse_rating("NaN"), 0.0);
    }
}
