use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Form field a validation rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Rating,
    Feedback,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Rating => "rating",
            Field::Feedback => "feedback",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untrusted review submission as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReviewInput {
    pub name: String,
    pub email: String,
    /// 0 means no star was selected
    pub rating: i64,
    pub feedback: String,
}

/// A candidate that passed validation but has not been stamped by the store yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedReview {
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub feedback: String,
}

impl ValidatedReview {
    pub fn accepted_at(self, date: DateTime<Utc>) -> Review {
        Review {
            name: self.name,
            email: self.email,
            rating: self.rating,
            feedback: self.feedback,
            date,
        }
    }
}

/// An accepted customer review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub feedback: String,
    #[serde(with = "iso_date")]
    pub date: DateTime<Utc>,
}

impl From<&Review> for RawReviewInput {
    fn from(review: &Review) -> Self {
        Self {
            name: review.name.clone(),
            email: review.email.clone(),
            rating: i64::from(review.rating),
            feedback: review.feedback.clone(),
        }
    }
}

/// Ordered set of accepted reviews, newest first.
///
/// Serializes as a bare JSON array so the persisted blob is just the list of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewCollection {
    reviews: Vec<Review>,
}

impl ReviewCollection {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn as_slice(&self) -> &[Review] {
        &self.reviews
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Review> {
        self.reviews.iter()
    }

    pub fn first(&self) -> Option<&Review> {
        self.reviews.first()
    }

    /// Insert at `index`, shifting later records back. Callers pick the index
    /// through an ordering policy.
    pub(crate) fn insert_at(&mut self, index: usize, review: Review) {
        let index = index.min(self.reviews.len());
        self.reviews.insert(index, review);
    }

    /// The fixed sample set shown before any customer has submitted a review
    pub fn seed() -> Self {
        let sample = |name: &str, email: &str, rating: u8, feedback: &str, day: (i32, u32, u32)| {
            Review {
                name: name.to_string(),
                email: email.to_string(),
                rating,
                feedback: feedback.to_string(),
                date: midnight_utc(day.0, day.1, day.2),
            }
        };

        Self::new(vec![
            sample(
                "Priya Sharma",
                "priya@email.com",
                5,
                "Absolutely stunning craftsmanship! The gold necklace I purchased exceeded my expectations. Every detail is perfection.",
                (2026, 1, 15),
            ),
            sample(
                "Anita Verma",
                "anita@email.com",
                4,
                "Beautiful collection and wonderful customer service. The bangles I got for my wedding were gorgeous.",
                (2026, 1, 28),
            ),
            sample(
                "Meera Patel",
                "meera@email.com",
                5,
                "Dwarika Naari Jewellery has the most elegant designs. I always receive compliments when I wear their pieces!",
                (2026, 2, 5),
            ),
        ])
    }
}

impl<'a> IntoIterator for &'a ReviewCollection {
    type Item = &'a Review;
    type IntoIter = std::slice::Iter<'a, Review>;

    fn into_iter(self) -> Self::IntoIter {
        self.reviews.iter()
    }
}

fn midnight_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// Validation failures keyed by field, one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure unless the field already has one
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// RFC 3339 with millisecond precision on write; plain `YYYY-MM-DD` also accepted on read
mod iso_date {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| de::Error::custom(format!("invalid review date: {}", raw)))
    }
}
