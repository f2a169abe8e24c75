//! Pet age in whole months.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A pet's age, stored as a non-negative number of months.
///
/// ```
/// use pet_portal_core::AgeMonths;
///
/// assert_eq!(AgeMonths::new(10).label(), "10 months");
/// assert_eq!(AgeMonths::new(18).label(), "1y 6m");
/// assert_eq!(AgeMonths::new(24).label(), "2 years");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct AgeMonths(u32);

impl AgeMonths {
    /// Create an age from a number of months.
    #[must_use]
    pub const fn new(months: u32) -> Self {
        Self(months)
    }

    /// Get the number of months.
    #[must_use]
    pub const fn months(self) -> u32 {
        self.0
    }

    /// Human-readable age (`"10 months"`, `"1 year"`, `"1y 6m"`, `"2 years"`).
    #[must_use]
    pub fn label(self) -> String {
        let months = self.0;
        if months < 12 {
            return match months {
                1 => "1 month".to_owned(),
                m => format!("{m} months"),
            };
        }

        let years = months / 12;
        match (years, months % 12) {
            (1, 0) => "1 year".to_owned(),
            (y, 0) => format!("{y} years"),
            (y, r) => format!("{y}y {r}m"),
        }
    }
}

impl fmt::Display for AgeMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<u32> for AgeMonths {
    fn from(months: u32) -> Self {
        Self(months)
    }
}
