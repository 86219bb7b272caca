use anyhow::Result;
use tracing::info;

use crate::aggregate::{average_rating, RatingSummary};
use crate::config::Config;
use crate::error::{StoreError, SubmitError};
use crate::models::{RawReviewInput, ReviewCollection};
use crate::storage::{JsonFileStorage, Storage};
use crate::store::ReviewStore;
use crate::validation::validate;

/// Entry point used by the page: submit candidates, read reviews, read the rating
pub struct ReviewBoard<S: Storage> {
    store: ReviewStore<S>,
}

impl ReviewBoard<JsonFileStorage> {
    /// Board backed by the JSON storage directory named in the config
    pub fn open(config: &Config) -> Result<Self> {
        let storage = JsonFileStorage::new(&config.store.dir)?;
        Ok(Self::new(ReviewStore::from_config(storage, &config.store)))
    }
}

impl<S: Storage> ReviewBoard<S> {
    pub fn new(store: ReviewStore<S>) -> Self {
        Self { store }
    }

    /// Current reviews, newest first
    pub fn load(&mut self) -> Result<ReviewCollection, StoreError> {
        self.store.load()
    }

    /// Validate a candidate and, if accepted, add it to the collection.
    ///
    /// Rejected candidates never reach the store.
    pub fn submit(&mut self, candidate: &RawReviewInput) -> Result<ReviewCollection, SubmitError> {
        let review = validate(candidate).inspect_err(|errors| {
            info!(fields = %errors, "Review rejected");
        })?;

        Ok(self.store.submit(review)?)
    }

    pub fn average_rating(&mut self) -> Result<f64, StoreError> {
        Ok(average_rating(self.store.load()?.as_slice()))
    }

    pub fn summary(&mut self) -> Result<RatingSummary, StoreError> {
        Ok(RatingSummary::from_collection(&self.store.load()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorruptionPolicy;
    use crate::models::Field;
    use crate::storage::MemoryStorage;
    use tempfile::tempdir;

    fn board(storage: &MemoryStorage) -> ReviewBoard<&MemoryStorage> {
        ReviewBoard::new(ReviewStore::new(storage, "dnj-reviews"))
    }

    fn candidate(name: &str, rating: i64) -> RawReviewInput {
        RawReviewInput {
            name: name.to_string(),
            email: "shopper@example.com".to_string(),
            rating,
            feedback: "The anklet is beautifully finished.".to_string(),
        }
    }

    #[test]
    fn test_fresh_board_shows_seed_rating() {
        let storage = MemoryStorage::new();
        let mut board = board(&storage);

        let reviews = board.load().unwrap();
        assert_eq!(reviews.len(), 3);

        let summary = board.summary().unwrap();
        assert_eq!(summary.display_text(), "4.7");
        assert_eq!(summary.stars, 5);
    }

    #[test]
    fn test_submit_updates_rating() {
        let storage = MemoryStorage::new();
        let mut board = board(&storage);

        let reviews = board.submit(&candidate("Kavya Rao", 1)).unwrap();
        assert_eq!(reviews.as_slice()[0].name, "Kavya Rao");
        assert_eq!(reviews.len(), 4);

        // (5 + 4 + 5 + 1) / 4
        assert_eq!(board.average_rating().unwrap(), 3.75);
        assert_eq!(board.summary().unwrap().display_text(), "3.8");
    }

    #[test]
    fn test_rejection_leaves_store_untouched() {
        let storage = MemoryStorage::new();
        let mut board = board(&storage);

        let err = board.submit(&candidate("   ", 6)).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains(Field::Name));
        assert!(errors.contains(Field::Rating));
        assert!(!errors.contains(Field::Email));

        // Nothing was loaded or written
        assert!(storage.get("dnj-reviews").unwrap().is_none());
        assert_eq!(board.load().unwrap().len(), 3);
    }

    #[test]
    fn test_duplicate_emails_are_separate_reviews() {
        let storage = MemoryStorage::new();
        let mut board = board(&storage);

        board.submit(&candidate("Kavya Rao", 5)).unwrap();
        let reviews = board.submit(&candidate("Kavya Rao", 4)).unwrap();

        assert_eq!(reviews.len(), 5);
        assert_eq!(reviews.as_slice()[0].rating, 4);
        assert_eq!(reviews.as_slice()[1].rating, 5);
    }

    #[test]
    fn test_store_error_surfaces_on_submit() {
        let storage = MemoryStorage::with_value("dnj-reviews", "nope");
        let store = ReviewStore::new(&storage, "dnj-reviews")
            .with_corruption_policy(CorruptionPolicy::Error);
        let mut board = ReviewBoard::new(store);

        let err = board.submit(&candidate("Kavya Rao", 5)).unwrap_err();
        assert!(matches!(err, SubmitError::Store(StoreError::Corrupted { .. })));
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_open_from_config() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.store.dir = dir.path().join("data");

        let mut board = ReviewBoard::open(&config).unwrap();
        board.submit(&candidate("Kavya Rao", 5)).unwrap();
        assert!(dir.path().join("data").join("dnj-reviews.json").exists());

        let mut reopened = ReviewBoard::open(&config).unwrap();
        assert_eq!(reopened.load().unwrap().len(), 4);
    }
}
