use chrono::{SubsecRound, Utc};
use tracing::{debug, info, warn};

use crate::config::{CorruptionPolicy, StoreConfig};
use crate::error::StoreError;
use crate::models::{ReviewCollection, ValidatedReview};
use crate::ordering::{NewestFirst, OrderingPolicy};
use crate::storage::Storage;
use crate::validation::check_stored;

/// Sole owner of the review collection and the one storage value backing it.
///
/// The collection is read from storage on first access and cached; every accepted
/// review rewrites the whole serialized collection. Callers only ever receive
/// snapshots.
pub struct ReviewStore<S, P = NewestFirst> {
    storage: S,
    key: String,
    on_corrupt: CorruptionPolicy,
    policy: P,
    reviews: Option<ReviewCollection>,
}

impl<S: Storage> ReviewStore<S, NewestFirst> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            on_corrupt: CorruptionPolicy::default(),
            policy: NewestFirst,
            reviews: None,
        }
    }

    pub fn from_config(storage: S, config: &StoreConfig) -> Self {
        Self::new(storage, config.key.clone()).with_corruption_policy(config.on_corrupt)
    }
}

impl<S: Storage, P: OrderingPolicy> ReviewStore<S, P> {
    pub fn with_corruption_policy(mut self, on_corrupt: CorruptionPolicy) -> Self {
        self.on_corrupt = on_corrupt;
        self
    }

    pub fn with_ordering<Q: OrderingPolicy>(self, policy: Q) -> ReviewStore<S, Q> {
        ReviewStore {
            storage: self.storage,
            key: self.key,
            on_corrupt: self.on_corrupt,
            policy,
            reviews: self.reviews,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current collection, reading storage on first access
    pub fn load(&mut self) -> Result<ReviewCollection, StoreError> {
        Ok(self.collection()?.clone())
    }

    /// Stamp an accepted review, insert it and persist the full collection.
    ///
    /// A failed write is logged and leaves the in-memory collection ahead of the
    /// durable copy; the review is not lost for this session.
    pub fn submit(&mut self, review: ValidatedReview) -> Result<ReviewCollection, StoreError> {
        self.collection()?;

        let review = review.accepted_at(Utc::now().trunc_subsecs(3));
        let reviews = self.reviews.get_or_insert_with(ReviewCollection::default);
        self.policy.insert(reviews, review);

        let snapshot = reviews.clone();
        self.persist(&snapshot);

        info!(key = %self.key, count = snapshot.len(), "Accepted review");

        Ok(snapshot)
    }

    fn collection(&mut self) -> Result<&mut ReviewCollection, StoreError> {
        if self.reviews.is_none() {
            let loaded = self.read_persisted()?;
            self.reviews = Some(loaded);
        }
        Ok(self.reviews.get_or_insert_with(ReviewCollection::default))
    }

    fn read_persisted(&self) -> Result<ReviewCollection, StoreError> {
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                return self.recover(StoreError::Unavailable {
                    key: self.key.clone(),
                    reason: format!("{:#}", e),
                })
            }
        };

        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            info!(key = %self.key, "No stored reviews, seeding defaults");
            let seed = ReviewCollection::seed();
            self.persist(&seed);
            return Ok(seed);
        };

        match parse_collection(&raw) {
            Ok(collection) => {
                debug!(key = %self.key, count = collection.len(), "Loaded stored reviews");
                Ok(collection)
            }
            Err(reason) => self.recover(StoreError::Corrupted {
                key: self.key.clone(),
                reason,
            }),
        }
    }

    fn recover(&self, err: StoreError) -> Result<ReviewCollection, StoreError> {
        match self.on_corrupt {
            CorruptionPolicy::Fallback => {
                warn!(key = %self.key, error = %err, "Stored reviews unusable, showing defaults");
                Ok(ReviewCollection::seed())
            }
            CorruptionPolicy::Error => Err(err),
        }
    }

    fn persist(&self, collection: &ReviewCollection) -> bool {
        let content = match serde_json::to_string_pretty(collection) {
            Ok(content) => content,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to serialize reviews");
                return false;
            }
        };

        match self.storage.set(&self.key, &content) {
            Ok(()) => true,
            Err(e) => {
                let error = format!("{:#}", e);
                warn!(key = %self.key, error = %error, "Failed to persist reviews, durable copy is stale");
                false
            }
        }
    }
}

fn parse_collection(raw: &str) -> Result<ReviewCollection, String> {
    let collection: ReviewCollection = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    for (index, review) in collection.iter().enumerate() {
        check_stored(review).map_err(|errors| format!("record {}: {}", index, errors))?;
    }

    Ok(collection)
}
