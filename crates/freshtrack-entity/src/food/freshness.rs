//! Freshness status derived from days remaining until expiration.

use serde::{Deserialize, Serialize};

/// How fresh an item is relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "days", rename_all = "snake_case")]
pub enum Freshness {
    /// The expiration date has passed.
    Expired,
    /// The item expires in this many days (0 means today).
    Remaining(i64),
}

impl Freshness {
    /// Classify a signed day count.
    pub fn from_days_left(days_left: i64) -> Self {
        if days_left < 0 {
            Self::Expired
        } else {
            Self::Remaining(days_left)
        }
    }

    /// Whether the item has expired.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }

    /// Human-readable status label.
    pub fn label(&self) -> String {
        match self {
            Self::Expired => "expired".to_string(),
            Self::Remaining(days) => format!("{days} days remaining"),
        }
    }
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_boundary() {
        assert_eq!(Freshness::from_days_left(-1).label(), "expired");
        assert_eq!(Freshness::from_days_left(0).label(), "0 days remaining");
        assert_eq!(Freshness::from_days_left(3).label(), "3 days remaining");
        assert!(Freshness::from_days_left(-10).is_expired());
        assert!(!Freshness::from_days_left(0).is_expired());
    }
}
