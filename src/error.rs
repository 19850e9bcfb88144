use thiserror::Error;

/// Unified error type for the runtally crate.
///
/// Every variant is a synchronous rejection of an inbound request, raised
/// before any lock is acquired or any state is touched. A rejected request
/// therefore never leaves a partial update behind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TallyError {
    #[error("runner name is missing or empty")]
    MissingName,

    #[error("country name is missing or empty")]
    MissingCountry,

    #[error("distance is missing")]
    MissingDistance,

    #[error("distance was {km} km but expected nonnegative")]
    NegativeDistance { km: i64 },
}

impl TallyError {
    /// Stable rejection slug for the binding layer and for logging.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingName => "missing-name",
            Self::MissingCountry => "missing-country",
            Self::MissingDistance => "missing-distance",
            Self::NegativeDistance { .. } => "negative-distance",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_slugs() {
        assert_eq!(TallyError::MissingName.reason(), "missing-name");
        assert_eq!(TallyError::MissingCountry.reason(), "missing-country");
        assert_eq!(TallyError::MissingDistance.reason(), "missing-distance");
        assert_eq!(
            TallyError::NegativeDistance { km: -4 }.reason(),
            "negative-distance"
        );
    }

    #[test]
    fn test_display_includes_offending_distance() {
        let err = TallyError::NegativeDistance { km: -12 };
        assert_eq!(err.to_string(), "distance was -12 km but expected nonnegative");
    }
}
