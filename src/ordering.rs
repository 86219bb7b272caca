use crate::models::{Review, ReviewCollection};

/// Decides where a newly accepted review lands in the collection.
///
/// Implementations must leave the relative order of existing records untouched;
/// they only pick an insertion index.
pub trait OrderingPolicy: Send + Sync {
    fn position(&self, existing: &[Review], incoming: &Review) -> usize;

    /// Insert `review` at the position this policy picks
    fn insert(&self, collection: &mut ReviewCollection, review: Review) {
        let index = self.position(collection.as_slice(), &review);
        collection.insert_at(index, review);
    }
}

/// Most recent submission first, regardless of the timestamps involved
#[derive(Debug, Clone, Copy, Default)]
pub struct NewestFirst;

impl OrderingPolicy for NewestFirst {
    fn position(&self, _existing: &[Review], _incoming: &Review) -> usize {
        0
    }
}
