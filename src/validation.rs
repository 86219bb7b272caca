use tracing::debug;

use crate::models::{Field, FieldErrors, RawReviewInput, Review, ValidatedReview};

pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;
pub const FEEDBACK_MIN: usize = 5;
pub const FEEDBACK_MAX: usize = 1000;

/// A single acceptance rule: the predicate must hold for the field's trimmed value
struct Rule {
    field: Field,
    check: fn(&Candidate<'_>) -> bool,
    message: &'static str,
}

/// Trimmed view over a raw submission
struct Candidate<'a> {
    name: &'a str,
    email: &'a str,
    rating: i64,
    feedback: &'a str,
}

impl<'a> Candidate<'a> {
    fn from_raw(raw: &'a RawReviewInput) -> Self {
        Self {
            name: raw.name.trim(),
            email: raw.email.trim(),
            rating: raw.rating,
            feedback: raw.feedback.trim(),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn name_present(c: &Candidate<'_>) -> bool {
    char_len(c.name) >= 1
}

fn name_short_enough(c: &Candidate<'_>) -> bool {
    char_len(c.name) <= NAME_MAX
}

fn email_well_formed(c: &Candidate<'_>) -> bool {
    is_valid_email(c.email)
}

fn email_short_enough(c: &Candidate<'_>) -> bool {
    char_len(c.email) <= EMAIL_MAX
}

fn rating_selected(c: &Candidate<'_>) -> bool {
    c.rating >= RATING_MIN
}

fn rating_in_range(c: &Candidate<'_>) -> bool {
    c.rating <= RATING_MAX
}

fn feedback_long_enough(c: &Candidate<'_>) -> bool {
    char_len(c.feedback) >= FEEDBACK_MIN
}

fn feedback_short_enough(c: &Candidate<'_>) -> bool {
    char_len(c.feedback) <= FEEDBACK_MAX
}

// Within a field, earlier rows win when several fail.
const RULES: &[Rule] = &[
    Rule { field: Field::Name, check: name_present, message: "Name is required" },
    Rule { field: Field::Name, check: name_short_enough, message: "Name must be at most 100 characters" },
    Rule { field: Field::Email, check: email_well_formed, message: "Please enter a valid email" },
    Rule { field: Field::Email, check: email_short_enough, message: "Email must be at most 255 characters" },
    Rule { field: Field::Rating, check: rating_selected, message: "Please select a rating" },
    Rule { field: Field::Rating, check: rating_in_range, message: "Rating must be at most 5" },
    Rule { field: Field::Feedback, check: feedback_long_enough, message: "Feedback must be at least 5 characters" },
    Rule { field: Field::Feedback, check: feedback_short_enough, message: "Feedback must be at most 1000 characters" },
];

fn evaluate(candidate: &Candidate<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for rule in RULES {
        if errors.contains(rule.field) {
            continue;
        }
        if !(rule.check)(candidate) {
            debug!(field = %rule.field, message = rule.message, "Validation rule failed");
            errors.add(rule.field, rule.message);
        }
    }

    errors
}

/// Check every field of a candidate and normalize it on success.
///
/// All failing fields are reported together. No date is assigned here; the store
/// stamps accepted reviews.
pub fn validate(raw: &RawReviewInput) -> Result<ValidatedReview, FieldErrors> {
    let candidate = Candidate::from_raw(raw);
    let errors = evaluate(&candidate);

    if !errors.is_empty() {
        return Err(errors);
    }

    let rating = u8::try_from(candidate.rating).map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.add(Field::Rating, "Rating must be at most 5");
        errors
    })?;

    Ok(ValidatedReview {
        name: candidate.name.to_string(),
        email: candidate.email.to_string(),
        rating,
        feedback: candidate.feedback.to_string(),
    })
}

/// Apply the acceptance rules to a record read back from storage.
///
/// Stored records must already be normalized, so untrimmed text counts as a failure.
pub fn check_stored(review: &Review) -> Result<(), FieldErrors> {
    let raw = RawReviewInput::from(review);
    let mut errors = evaluate(&Candidate::from_raw(&raw));

    let untrimmed = [
        (Field::Name, &review.name),
        (Field::Email, &review.email),
        (Field::Feedback, &review.feedback),
    ];
    for (field, value) in untrimmed {
        if value.trim() != value.as_str() {
            errors.add(field, "Stored value is not trimmed");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Email syntax check.
///
/// One `@`; a local part of `[A-Za-z0-9_'+\-.]` that neither starts with a dot nor
/// ends with a dot or apostrophe and has no `..`; then dot-separated domain labels
/// and an alphabetic TLD of at least two letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if domain.contains('@') {
        return false;
    }

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.starts_with('.') || local.contains("..") {
        return false;
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.');
    if !local.chars().all(allowed) {
        return false;
    }

    !matches!(local.chars().last(), Some('.') | Some('\''))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };

    if hosts.is_empty() {
        return false;
    }

    let label_ok = |label: &&str| {
        let mut chars = label.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphanumeric() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
            }
            _ => false,
        }
    };

    hosts.iter().all(label_ok) && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
