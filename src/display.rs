use chrono::{DateTime, Utc};

use crate::aggregate::RatingSummary;
use crate::models::Review;

const MAX_STARS: u8 = 5;

/// Up to two uppercase initials for the reviewer avatar
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Five-star bar with the first `stars` filled
pub fn star_bar(stars: u8) -> String {
    let filled = stars.min(MAX_STARS);
    (1..=MAX_STARS)
        .map(|i| if i <= filled { '★' } else { '☆' })
        .collect()
}

/// Review date as shown on cards, e.g. `15 Jan 2026`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Header line, e.g. `4.7 out of 5 (3 reviews)`
pub fn headline(summary: &RatingSummary) -> String {
    format!(
        "{} out of 5 ({} {})",
        summary.display_text(),
        summary.count,
        if summary.count == 1 { "review" } else { "reviews" }
    )
}

/// Plain-text rendering of one review card
pub fn review_card(review: &Review) -> String {
    format!(
        "[{}] {}  {}\n{}\n{}",
        initials(&review.name),
        review.name,
        format_date(&review.date),
        star_bar(review.rating),
        review.feedback
    )
}
