//! State owners behind the app shell
//!
//! - `search`: query, results and the in-flight search
//! - `selection`: selected movie, its detail fetch and the title effect
//! - `watched`: the watched list and its averages

pub mod search;
pub mod selection;
pub mod watched;

pub use search::{QueryOutcome, SearchController, SearchState, MIN_QUERY_LEN, NOT_FOUND_MESSAGE};
pub use selection::{DetailState, SelectionController, SelectionState};
pub use watched::{WatchedError, WatchedListController};
