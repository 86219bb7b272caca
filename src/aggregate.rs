use serde::{Deserialize, Serialize};

use crate::models::{Review, ReviewCollection};

/// Arithmetic mean of all ratings; 0 for an empty collection
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let total: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    total as f64 / reviews.len() as f64
}

/// Mean rounded to one decimal place, halves rounded up
pub fn display_rating(mean: f64) -> f64 {
    (mean * 10.0).round() / 10.0
}

/// Mean rounded to the nearest whole star, halves rounded up
pub fn star_rating(mean: f64) -> u8 {
    mean.round().clamp(0.0, 5.0) as u8
}

/// Aggregate figures shown in the page header
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub display: f64,
    pub stars: u8,
    pub count: usize,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let average = average_rating(reviews);
        Self {
            average,
            display: display_rating(average),
            stars: star_rating(average),
            count: reviews.len(),
        }
    }

    pub fn from_collection(collection: &ReviewCollection) -> Self {
        Self::from_reviews(collection.as_slice())
    }

    /// One-decimal text form, e.g. `4.7`
    pub fn display_text(&self) -> String {
        format!("{:.1}", self.display)
    }
}
