use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Market price in USD as reported by the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
}

impl Price {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }

    /// Parses one of the catalog's decimal strings. Anything that is not a
    /// finite, non-negative number is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let amount: f64 = raw.trim().parse().ok()?;
        if amount.is_finite() && amount >= 0.0 {
            Some(Price::new(amount))
        } else {
            None
        }
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.amount.partial_cmp(&other.amount)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.amount)
    }
}
