//! Rating type
//!
//! Domain primitive for feedback ratings with validation at construction
//! time, ensuring out-of-range values cannot exist in the system.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Inclusive rating bounds
const MIN_RATING: i64 = 1;
const MAX_RATING: i64 = 5;

/// Rating represents a validated 1..=5 feedback score.
///
/// # Example
/// ```
/// use campus_events::domain::Rating;
///
/// let rating = Rating::new(5).unwrap();
/// assert_eq!(rating.value(), 5);
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(i64);

impl Rating {
    /// Create a new Rating with validation.
    ///
    /// # Errors
    /// - `DomainError::InvalidRating` if value is outside 1..=5
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(DomainError::InvalidRating(value));
        }

        Ok(Self(value))
    }

    /// Get the underlying value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ratings() {
        for value in 1..=5 {
            let rating = Rating::new(value).unwrap();
            assert_eq!(rating.value(), value);
        }
    }

    #[test]
    fn test_out_of_range_ratings() {
        assert_eq!(Rating::new(0).unwrap_err(), DomainError::InvalidRating(0));
        assert_eq!(Rating::new(6).unwrap_err(), DomainError::InvalidRating(6));
        assert_eq!(
            Rating::new(-3).unwrap_err(),
            DomainError::InvalidRating(-3)
        );
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let rating: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(rating.value(), 4);

        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
