//! Deterministic lead quality scoring.
//!
//! Points are accumulated per condition and clamped to 100. The weights and
//! presence/validity conditions below are a stable contract: tenant quality
//! filters were tuned against historical scores, so reweighting would
//! silently change which leads get charged.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Email present and shaped like `local@domain.tld`.
pub const EMAIL_POINTS: u8 = 30;
/// Phone present with at least 10 digits.
pub const PHONE_POINTS: u8 = 25;
/// Both first and last name present.
pub const FULL_NAME_POINTS: u8 = 20;
/// Exactly one of first/last name present.
pub const PARTIAL_NAME_POINTS: u8 = 10;
/// City and state present (flat fields or a nested `address` object).
pub const LOCATION_POINTS: u8 = 15;
/// Demographics map with more than the configured minimum number of keys.
pub const DEMOGRAPHICS_POINTS: u8 = 10;

/// Maximum achievable score.
pub const MAX_SCORE: u8 = 100;

/// Default demographics key threshold (strictly more than this many keys).
pub const DEFAULT_DEMOGRAPHICS_MIN_KEYS: usize = 2;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("email regex"));

// Allowed phone characters; digit count is checked separately.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9()\s\-]+$").expect("phone regex"));

/// Compute the 0–100 quality score for a canonical lead field map.
///
/// Pure and deterministic: repeated invocations on the same map return the
/// same score, and the result never exceeds [`MAX_SCORE`].
pub fn quality_score(fields: &Map<String, Value>, demographics_min_keys: usize) -> u8 {
    let mut score: u32 = 0;

    if field_str(fields, "email").is_some_and(is_valid_email) {
        score += u32::from(EMAIL_POINTS);
    }

    if field_str(fields, "phone").is_some_and(is_valid_phone) {
        score += u32::from(PHONE_POINTS);
    }

    let first = field_str(fields, "first_name").is_some();
    let last = field_str(fields, "last_name").is_some();
    score += match (first, last) {
        (true, true) => u32::from(FULL_NAME_POINTS),
        (true, false) | (false, true) => u32::from(PARTIAL_NAME_POINTS),
        (false, false) => 0,
    };

    if has_location(fields) {
        score += u32::from(LOCATION_POINTS);
    }

    if fields
        .get("demographics")
        .and_then(Value::as_object)
        .is_some_and(|demo| demo.len() > demographics_min_keys)
    {
        score += u32::from(DEMOGRAPHICS_POINTS);
    }

    score.min(u32::from(MAX_SCORE)) as u8
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, alphabetic TLD
/// of at least two characters.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least 10 digits; only digits, spaces, parentheses, hyphens, and an
/// optional leading `+` are allowed.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone) && phone.chars().filter(char::is_ascii_digit).count() >= 10
}

/// City and state both present, either as flat `city`/`state` fields or
/// inside a nested `address` object.
fn has_location(fields: &Map<String, Value>) -> bool {
    if field_str(fields, "city").is_some() && field_str(fields, "state").is_some() {
        return true;
    }
    fields
        .get("address")
        .and_then(Value::as_object)
        .is_some_and(|addr| {
            addr.get("city").and_then(Value::as_str).is_some_and(|s| !s.is_empty())
                && addr.get("state").and_then(Value::as_str).is_some_and(|s| !s.is_empty())
        })
}

/// Non-empty string field, or `None`.
fn field_str<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn complete_lead_scores_100() {
        let lead = fields(json!({
            "email": "a@b.com",
            "phone": "+1 (555) 123-4567",
            "first_name": "J",
            "last_name": "D",
            "city": "NY",
            "state": "NY",
            "demographics": { "age": 30, "income": 50000, "tier": "gold" },
        }));
        assert_eq!(quality_score(&lead, 2), 100);
    }

    #[test]
    fn invalid_email_alone_scores_0() {
        let lead = fields(json!({ "email": "bad-email" }));
        assert_eq!(quality_score(&lead, 2), 0);
    }

    #[test]
    fn empty_lead_scores_0() {
        assert_eq!(quality_score(&Map::new(), 2), 0);
    }

    #[test]
    fn valid_email_scores_email_points() {
        let lead = fields(json!({ "email": "user@example.org" }));
        assert_eq!(quality_score(&lead, 2), EMAIL_POINTS);
    }

    #[test]
    fn phone_needs_ten_digits() {
        let short = fields(json!({ "phone": "555-1234" }));
        assert_eq!(quality_score(&short, 2), 0);

        let long = fields(json!({ "phone": "(555) 123-4567" }));
        assert_eq!(quality_score(&long, 2), PHONE_POINTS);
    }

    #[test]
    fn phone_rejects_letters() {
        let lead = fields(json!({ "phone": "555-CALL-NOW-123" }));
        assert_eq!(quality_score(&lead, 2), 0);
    }

    #[test]
    fn single_name_scores_partial_points() {
        let first_only = fields(json!({ "first_name": "J" }));
        assert_eq!(quality_score(&first_only, 2), PARTIAL_NAME_POINTS);

        let last_only = fields(json!({ "last_name": "D" }));
        assert_eq!(quality_score(&last_only, 2), PARTIAL_NAME_POINTS);
    }

    #[test]
    fn both_names_score_full_name_points() {
        let lead = fields(json!({ "first_name": "J", "last_name": "D" }));
        assert_eq!(quality_score(&lead, 2), FULL_NAME_POINTS);
    }

    #[test]
    fn nested_address_counts_as_location() {
        let lead = fields(json!({ "address": { "city": "NY", "state": "NY" } }));
        assert_eq!(quality_score(&lead, 2), LOCATION_POINTS);
    }

    #[test]
    fn city_without_state_scores_nothing() {
        let lead = fields(json!({ "city": "NY" }));
        assert_eq!(quality_score(&lead, 2), 0);
    }

    #[test]
    fn demographics_threshold_is_strict() {
        let two_keys = fields(json!({ "demographics": { "age": 30, "tier": "gold" } }));
        assert_eq!(quality_score(&two_keys, 2), 0);

        let three_keys = fields(json!({
            "demographics": { "age": 30, "income": 50000, "tier": "gold" },
        }));
        assert_eq!(quality_score(&three_keys, 2), DEMOGRAPHICS_POINTS);
    }

    #[test]
    fn score_is_deterministic() {
        let lead = fields(json!({
            "email": "a@b.com",
            "first_name": "J",
            "demographics": { "a": 1, "b": 2, "c": 3, "d": 4 },
        }));
        let first = quality_score(&lead, 2);
        for _ in 0..10 {
            assert_eq!(quality_score(&lead, 2), first);
        }
        assert!(first <= MAX_SCORE);
    }

    #[test]
    fn email_with_two_at_signs_is_invalid() {
        assert!(!is_valid_email("a@b@c.com"));
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
    }
}
