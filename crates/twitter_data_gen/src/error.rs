//! Errors raised before any rows are generated.

use thiserror::Error;

/// Invalid generation settings.
///
/// Deduplication shrinking a collection below its requested size is not an
/// error; it is reported through [`crate::CollectionSummary`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("{entity} requests {count} rows but the {referenced} ID space is empty")]
    EmptyIdSpace {
        entity: &'static str,
        referenced: &'static str,
        count: usize,
    },

    #[error("followers need at least two users to avoid self-follows (got {users})")]
    SelfReferenceImpossible { users: usize },

    #[error("invalid age range: minimum age {min} exceeds maximum age {max}")]
    InvalidAgeRange { min: u32, max: u32 },

    #[error("maximum age {max} exceeds the supported limit of {limit}")]
    AgeOutOfRange { max: u32, limit: u32 },

    #[error("no email domain has a positive weight")]
    NoEmailDomains,
}

pub type Result<T> = std::result::Result<T, GenerationError>;
