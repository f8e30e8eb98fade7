pub mod controller;
pub mod detail;
pub mod error;
pub mod events;
pub mod rating;
pub mod request;
pub mod search;
pub mod selection;
pub mod watch_list;

pub use controller::{Controller, ControllerOptions};
pub use detail::{DetailRequest, DetailSession, DETAIL_FAILED_MESSAGE};
pub use error::CoreError;
pub use events::Event;
pub use rating::RatingInput;
pub use request::{FetchTicket, RequestId, RequestTracker};
pub use search::{SearchRequest, SearchSession, FETCH_FAILED_MESSAGE, NOT_FOUND_MESSAGE};
pub use selection::Selection;
pub use watch_list::{Upsert, WatchList};
