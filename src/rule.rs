use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::store::KeyHasher;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    // compiled user patterns, None marks a pattern that failed to compile
    static ref PATTERNS: Mutex<HashMap<String, Option<Regex>, KeyHasher>> =
        Mutex::new(HashMap::default());
}

const PATTERN_CACHE_LIMIT: usize = 256;

/// A single validation rule. The set is closed: every rule is matched
/// exhaustively both when validating and when producing its message.
///
/// Rules are plain values, compared by variant and payload, and can be read
/// from configuration as `{ "kind": "min_length", "value": 8 }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValidationRule {
    NotEmpty,
    Email,
    MinLength(usize),
    MaxLength(usize),
    Regex(String),
}

impl ValidationRule {
    pub fn validate(&self, value: &str) -> bool {
        match self {
            ValidationRule::NotEmpty => !value.trim().is_empty(),
            ValidationRule::Email => EMAIL.is_match(value),
            ValidationRule::MinLength(min) => character_count(value) >= *min,
            ValidationRule::MaxLength(max) => character_count(value) <= *max,
            ValidationRule::Regex(pattern) => matches_pattern(pattern, value),
        }
    }
    pub fn error_message(&self) -> String {
        match self {
            ValidationRule::NotEmpty => "Field cannot be empty".to_string(),
            ValidationRule::Email => "Invalid email format".to_string(),
            ValidationRule::MinLength(min) => format!("Minimum {} characters required", min),
            ValidationRule::MaxLength(max) => format!("Maximum {} characters allowed", max),
            ValidationRule::Regex(_) => "Invalid format".to_string(),
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationRule::NotEmpty => write!(f, "not empty"),
            ValidationRule::Email => write!(f, "email"),
            ValidationRule::MinLength(min) => write!(f, "min length {}", min),
            ValidationRule::MaxLength(max) => write!(f, "max length {}", max),
            ValidationRule::Regex(pattern) => write!(f, "regex /{}/", pattern),
        }
    }
}

fn character_count(value: &str) -> usize {
    value.graphemes(true).count()
}

// A pattern that does not compile never matches, so the rule fails.
fn matches_pattern(pattern: &str, value: &str) -> bool {
    compiled_pattern(pattern).is_some_and(|regex| regex.is_match(value))
}

// Compiling and matching happen outside the cache lock.
fn compiled_pattern(pattern: &str) -> Option<Regex> {
    if let Some(cached) = patterns().get(pattern) {
        return cached.clone();
    }
    let compiled = match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            warn!(%pattern, error = %err, "validation pattern does not compile");
            None
        }
    };
    let mut patterns = patterns();
    if patterns.len() >= PATTERN_CACHE_LIMIT {
        patterns.clear();
    }
    patterns.insert(pattern.to_string(), compiled.clone());
    compiled
}

fn patterns() -> MutexGuard<'static, HashMap<String, Option<Regex>, KeyHasher>> {
    match PATTERNS.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_cache_stays_bounded() {
        for n in 0..PATTERN_CACHE_LIMIT * 2 {
            let pattern = format!("^item-{}$", n);
            assert!(matches_pattern(&pattern, &format!("item-{}", n)));
            assert!(!matches_pattern(&pattern, "item-"));
            assert!(patterns().len() <= PATTERN_CACHE_LIMIT);
        }
    }

    #[test]
    fn broken_pattern_never_matches() {
        assert!(compiled_pattern("([unclosed").is_none());
        assert!(!matches_pattern("([unclosed", "([unclosed"));
    }
}
