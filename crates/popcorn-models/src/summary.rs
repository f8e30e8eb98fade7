use serde::{Deserialize, Serialize};

/// Aggregates over the watched list.
///
/// Means are `None` when there is nothing to average, rather than a NaN
/// produced by dividing by zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchSummary {
    pub count: usize,
    pub mean_external_rating: Option<f64>,
    pub mean_user_rating: Option<f64>,
    pub mean_runtime_minutes: Option<f64>,
}
