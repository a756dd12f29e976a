//! Fault-inducing operations for error samples.
//!
//! Each [`FaultKind`] maps to a small operation that always fails. The
//! resulting [`SampleError`] is what gets captured by the telemetry client.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::num::ParseIntError;
use thiserror::Error;

/// Index read from the empty list by [`FaultKind::IndexOutOfRange`].
const OUT_OF_RANGE_INDEX: usize = 5;

/// Key looked up by [`FaultKind::MissingKey`].
const MISSING_KEY: &str = "missing_key";

/// Errors produced by the fault-inducing operations.
#[derive(Debug, Error)]
pub enum SampleError {
    /// An integer division with a zero divisor.
    #[error("attempted to divide {dividend} by zero")]
    DivisionByZero {
        /// The value that was being divided.
        dividend: i64,
    },

    /// Text that could not be parsed as an integer.
    #[error("invalid number {input:?}")]
    InvalidNumber {
        /// The text that failed to parse.
        input: String,
        /// The underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// A read past the end of a list.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The length of the list.
        len: usize,
    },

    /// A lookup for a key that is not in the map.
    #[error("key {0:?} not found")]
    MissingKey(String),
}

impl SampleError {
    /// Returns the fault kind that produced this error.
    #[must_use]
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::DivisionByZero { .. } => FaultKind::DivisionByZero,
            Self::InvalidNumber { .. } => FaultKind::InvalidNumber,
            Self::IndexOutOfRange { .. } => FaultKind::IndexOutOfRange,
            Self::MissingKey(_) => FaultKind::MissingKey,
        }
    }
}

/// The kind of fault triggered by an error sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Divide an integer by zero.
    DivisionByZero,
    /// Parse `"not_a_number"` as an integer.
    InvalidNumber,
    /// Read index 5 of an empty list.
    IndexOutOfRange,
    /// Look up `"missing_key"` in a single-entry map.
    MissingKey,
}

impl FaultKind {
    /// Every fault kind, in declaration order.
    pub const ALL: [FaultKind; 4] = [
        Self::DivisionByZero,
        Self::InvalidNumber,
        Self::IndexOutOfRange,
        Self::MissingKey,
    ];

    /// Picks a fault kind uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL
            .choose(rng)
            .unwrap_or(&Self::DivisionByZero)
    }

    /// Returns the name reported when the error is sent.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DivisionByZero => "DivisionByZero",
            Self::InvalidNumber => "InvalidNumber",
            Self::IndexOutOfRange => "IndexOutOfRange",
            Self::MissingKey => "MissingKey",
        }
    }

    /// Runs the fault-inducing operation.
    ///
    /// # Errors
    ///
    /// Always returns the [`SampleError`] matching this kind; the operations
    /// are built so that none of them can succeed.
    pub fn trigger(self) -> Result<String, SampleError> {
        match self {
            Self::DivisionByZero => {
                let dividend: i64 = 1;
                let divisor: i64 = 0;
                dividend
                    .checked_div(divisor)
                    .map(|quotient| quotient.to_string())
                    .ok_or(SampleError::DivisionByZero { dividend })
            }
            Self::InvalidNumber => {
                let input = "not_a_number";
                input
                    .parse::<i64>()
                    .map(|value| value.to_string())
                    .map_err(|source| SampleError::InvalidNumber {
                        input: input.to_string(),
                        source,
                    })
            }
            Self::IndexOutOfRange => {
                let items: Vec<i64> = Vec::new();
                items
                    .get(OUT_OF_RANGE_INDEX)
                    .map(ToString::to_string)
                    .ok_or(SampleError::IndexOutOfRange {
                        index: OUT_OF_RANGE_INDEX,
                        len: items.len(),
                    })
            }
            Self::MissingKey => {
                let map = HashMap::from([("key", "value")]);
                map.get(MISSING_KEY)
                    .map(ToString::to_string)
                    .ok_or_else(|| SampleError::MissingKey(MISSING_KEY.to_string()))
            }
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::error::Error as _;

    #[test]
    fn test_every_fault_kind_fails() {
        for kind in FaultKind::ALL {
            let result = kind.trigger();
            assert!(result.is_err(), "{kind} unexpectedly succeeded");
        }
    }

    #[test]
    fn test_error_kind_matches_trigger() {
        for kind in FaultKind::ALL {
            let err = kind.trigger().unwrap_err();
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn test_division_by_zero() {
        let err = FaultKind::DivisionByZero.trigger().unwrap_err();
        assert!(matches!(err, SampleError::DivisionByZero { dividend: 1 }));
        assert_eq!(err.to_string(), "attempted to divide 1 by zero");
    }

    #[test]
    fn test_invalid_number_keeps_source() {
        let err = FaultKind::InvalidNumber.trigger().unwrap_err();
        assert!(matches!(err, SampleError::InvalidNumber { ref input, .. } if input == "not_a_number"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_index_out_of_range() {
        let err = FaultKind::IndexOutOfRange.trigger().unwrap_err();
        assert!(matches!(
            err,
            SampleError::IndexOutOfRange { index: 5, len: 0 }
        ));
    }

    #[test]
    fn test_missing_key() {
        let err = FaultKind::MissingKey.trigger().unwrap_err();
        assert!(matches!(err, SampleError::MissingKey(ref key) if key == "missing_key"));
        assert_eq!(err.to_string(), "key \"missing_key\" not found");
    }

    #[test]
    fn test_random_covers_all_kinds() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<FaultKind> = (0..200).map(|_| FaultKind::random(&mut rng)).collect();
        assert_eq!(seen.len(), FaultKind::ALL.len());
    }

    #[test]
    fn test_fault_kind_display() {
        assert_eq!(FaultKind::DivisionByZero.to_string(), "DivisionByZero");
        assert_eq!(FaultKind::MissingKey.to_string(), "MissingKey");
    }
}
