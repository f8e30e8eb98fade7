use popcorn_models::{WatchSummary, WatchedEntry};
use tracing::debug;

/// What an upsert did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced { index: usize },
}

/// Ordered list of rated movies, unique by IMDb id.
#[derive(Debug, Clone, Default)]
pub struct WatchList {
    entries: Vec<WatchedEntry>,
}

impl WatchList {
    pub fn new() -> Self {
        Self::default()
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

    pub fn get(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|entry| entry.imdb_id == imdb_id)
    }

    /// Insert, or replace an entry with the same id where it currently sits.
    pub fn upsert(&mut self, entry: WatchedEntry) -> Upsert {
        match self.entries.iter().position(|existing| existing.imdb_id == entry.imdb_id) {
            Some(index) => {
                debug!(imdb_id = %entry.imdb_id, index, "Replacing watched entry");
                self.entries[index] = entry;
                Upsert::Replaced { index }
            }
            None => {
                debug!(imdb_id = %entry.imdb_id, "Appending watched entry");
                self.entries.push(entry);
                Upsert::Inserted
            }
        }
    }

    /// Remove the entry with this id. Absent ids are a no-op.
    pub fn remove(&mut self, imdb_id: &str) -> Option<WatchedEntry> {
        let index = self.entries.iter().position(|entry| entry.imdb_id == imdb_id)?;
        Some(self.entries.remove(index))
    }

    pub fn summary(&self) -> WatchSummary {
        WatchSummary {
            count: self.entries.len(),
            mean_external_rating: mean(self.entries.iter().filter_map(|e| e.external_rating)),
            mean_user_rating: mean(self.entries.iter().map(|e| f64::from(e.user_rating))),
            mean_runtime_minutes: mean(self.entries.iter().filter_map(|e| e.runtime_minutes.map(f64::from))),
        }
    }
}

/// Entries without a value (provider "N/A") do not count toward that mean.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_entry(imdb_id: &str, external: Option<f64>, user: u8, runtime: Option<u32>) -> WatchedEntry {
        WatchedEntry {
            imdb_id: imdb_id.to_string(),
            title: format!("Movie {}", imdb_id),
            year: "2020".to_string(),
            poster_url: None,
            external_rating: external,
            runtime_minutes: runtime,
            user_rating: user,
            rated_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_appends_new_ids() {
        let mut list = WatchList::new();
        assert_eq!(list.upsert(create_entry("tt001", Some(7.0), 8, Some(100))), Upsert::Inserted);
        assert_eq!(list.upsert(create_entry("tt002", Some(6.0), 5, Some(90))), Upsert::Inserted);
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[1].imdb_id, "tt002");
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut list = WatchList::new();
        list.upsert(create_entry("tt001", Some(7.0), 8, Some(100)));
        list.upsert(create_entry("tt002", Some(6.0), 5, Some(90)));
        list.upsert(create_entry("tt003", Some(5.0), 3, Some(80)));

        let outcome = list.upsert(create_entry("tt002", Some(6.0), 10, Some(90)));
        assert_eq!(outcome, Upsert::Replaced { index: 1 });
        assert_eq!(list.len(), 3);
        assert_eq!(list.entries()[1].imdb_id, "tt002");
        assert_eq!(list.entries()[1].user_rating, 10);
        assert_eq!(list.entries()[2].imdb_id, "tt003");
    }

    #[test]
    fn test_remove() {
        let mut list = WatchList::new();
        list.upsert(create_entry("tt001", Some(7.0), 8, Some(100)));
        list.upsert(create_entry("tt002", Some(6.0), 5, Some(90)));

        let removed = list.remove("tt001").unwrap();
        assert_eq!(removed.imdb_id, "tt001");
        assert_eq!(list.len(), 1);
        assert!(list.get("tt001").is_none());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut list = WatchList::new();
        list.upsert(create_entry("tt001", Some(7.0), 8, Some(100)));

        assert!(list.remove("tt999").is_none());
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].imdb_id, "tt001");
    }

    #[test]
    fn test_summary_means() {
        let mut list = WatchList::new();
        list.upsert(create_entry("tt001", Some(8.0), 9, Some(120)));
        list.upsert(create_entry("tt002", Some(6.0), 7, Some(90)));

        let summary = list.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean_external_rating, Some(7.0));
        assert_eq!(summary.mean_user_rating, Some(8.0));
        assert_eq!(summary.mean_runtime_minutes, Some(105.0));
    }

    #[test]
    fn test_summary_empty_list() {
        let summary = WatchList::new().summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean_external_rating, None);
        assert_eq!(summary.mean_user_rating, None);
        assert_eq!(summary.mean_runtime_minutes, None);
    }

    #[test]
    fn test_summary_skips_missing_provider_values() {
        let mut list = WatchList::new();
        list.upsert(create_entry("tt001", None, 6, None));
        list.upsert(create_entry("tt002", Some(9.0), 8, Some(100)));

        let summary = list.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean_external_rating, Some(9.0));
        assert_eq!(summary.mean_user_rating, Some(7.0));
        assert_eq!(summary.mean_runtime_minutes, Some(100.0));
    }
}
