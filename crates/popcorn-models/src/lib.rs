pub mod movie;
pub mod search_result;
pub mod status;
pub mod summary;
pub mod watched;

pub use movie::{parse_runtime_minutes, MovieDetail};
pub use search_result::SearchResult;
pub use status::SessionStatus;
pub use summary::WatchSummary;
pub use watched::WatchedEntry;
