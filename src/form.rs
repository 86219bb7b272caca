use serde::{Deserialize, Serialize};

use crate::board::ReviewBoard;
use crate::error::{StoreError, SubmitError};
use crate::models::{FieldErrors, RawReviewInput};
use crate::storage::Storage;

/// State of the "write a review" form between interactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewForm {
    pub name: String,
    pub email: String,
    pub rating: i64,
    pub feedback: String,
    pub errors: FieldErrors,
    /// Set after a successful submission so the page can thank the reviewer
    pub submitted: bool,
}

impl ReviewForm {
    pub fn candidate(&self) -> RawReviewInput {
        RawReviewInput {
            name: self.name.clone(),
            email: self.email.clone(),
            rating: self.rating,
            feedback: self.feedback.clone(),
        }
    }

    /// Submit the current values and return the next form state.
    ///
    /// A rejected form keeps what the reviewer typed and carries the field errors;
    /// an accepted one comes back empty with `submitted` set.
    pub fn submit<S: Storage>(self, board: &mut ReviewBoard<S>) -> Result<ReviewForm, StoreError> {
        match board.submit(&self.candidate()) {
            Ok(_) => Ok(ReviewForm {
                submitted: true,
                ..ReviewForm::default()
            }),
            Err(SubmitError::Invalid(errors)) => Ok(ReviewForm {
                errors,
                submitted: false,
                ..self
            }),
            Err(SubmitError::Store(e)) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;
    use crate::storage::MemoryStorage;
    use crate::store::ReviewStore;

    fn filled() -> ReviewForm {
        ReviewForm {
            name: "Kavya Rao".to_string(),
            email: "kavya@example.com".to_string(),
            rating: 5,
            feedback: "Wonderful temple jewellery.".to_string(),
            ..ReviewForm::default()
        }
    }

    #[test]
    fn test_success_clears_form() {
        let storage = MemoryStorage::new();
        let mut board = ReviewBoard::new(ReviewStore::new(&storage, "dnj-reviews"));

        let next = filled().submit(&mut board).unwrap();
        assert!(next.submitted);
        assert!(next.name.is_empty());
        assert_eq!(next.rating, 0);
        assert!(next.errors.is_empty());

        assert_eq!(board.load().unwrap().len(), 4);
    }

    #[test]
    fn test_rejection_keeps_values() {
        let storage = MemoryStorage::new();
        let mut board = ReviewBoard::new(ReviewStore::new(&storage, "dnj-reviews"));

        let form = ReviewForm {
            email: "kavya-at-example".to_string(),
            rating: 0,
            ..filled()
        };
        let next = form.clone().submit(&mut board).unwrap();

        assert!(!next.submitted);
        assert_eq!(next.name, form.name);
        assert_eq!(next.email, form.email);
        assert_eq!(next.errors.get(Field::Rating), Some("Please select a rating"));
        assert_eq!(next.errors.get(Field::Email), Some("Please enter a valid email"));
        assert_eq!(next.errors.len(), 2);
    }

    #[test]
    fn test_resubmission_clears_stale_errors() {
        let storage = MemoryStorage::new();
        let mut board = ReviewBoard::new(ReviewStore::new(&storage, "dnj-reviews"));

        let rejected = ReviewForm { rating: 0, ..filled() }.submit(&mut board).unwrap();
        assert!(!rejected.errors.is_empty());

        let fixed = ReviewForm { rating: 4, ..rejected };
        let next = fixed.submit(&mut board).unwrap();
        assert!(next.submitted);
        assert!(next.errors.is_empty());
    }

    #[test]
    fn test_form_state_serializes() {
        let json = serde_json::to_value(filled()).unwrap();
        assert_eq!(json["rating"], 5);
        assert_eq!(json["submitted"], false);

        let back: ReviewForm = serde_json::from_value(json).unwrap();
        assert_eq!(back, filled());
    }
}
