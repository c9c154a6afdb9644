//! Error types for token issuing and verification
//!
//! Every stage of the pipeline (parsing, signing, verification, claim
//! validation) returns one of these variants. Callers facing end users should
//! not expose the distinction; see [`BearerAuth`](crate::BearerAuth), which
//! collapses every failure into the same challenge.

use thiserror::Error;

/// Errors that can occur while building, parsing, verifying or validating tokens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    /// Not exactly three non-empty segments separated by '.'
    #[error("Malformed token: expected three non-empty segments separated by '.'")]
    MalformedToken,

    /// Token text exceeds the accepted size
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    /// A segment is not valid unpadded Base64URL
    #[error("Base64URL decoding failed: {0}")]
    MalformedEncoding(String),

    /// Header or payload JSON does not have the expected structure
    #[error("Malformed claims: {0}")]
    MalformedClaims(String),

    // ============================================================================
    // Algorithm / Key Errors
    // ============================================================================
    /// Algorithm is unknown, disabled, or not the one the verifier expects.
    /// `"none"` always lands here.
    #[error("Algorithm '{0}' is not supported or not expected")]
    UnsupportedAlgorithm(String),

    /// Key family or curve does not fit the algorithm
    #[error(
        "Key type mismatch for algorithm '{algorithm}': expected {expected_key_type}, got {actual_key_type}"
    )]
    KeyTypeMismatch {
        algorithm: String,
        expected_key_type: String,
        actual_key_type: String,
    },

    /// Key material of the right family could not be loaded
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Claim validation failed: {0}")]
    ValidationFailure(#[from] ValidationFailure),
}

/// Which constraint of a [`ValidationData`](crate::ValidationData) rejected a claim set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    IssuerEquals,
    AudienceContains,
    IdEquals,
    SubjectEquals,
    NotExpired,
    NotBefore,
    IssuedBeforeNow,
    ClaimPresent,
}

/// Claim validation failures, one per constraint kind
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    #[error("Token expired at {expired_at} (now: {now}, leeway: {leeway}s)")]
    Expired {
        expired_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, leeway: {leeway}s)")]
    NotYetValid {
        not_before: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Token issued in future at {issued_at} (now: {now}, leeway: {leeway}s)")]
    IssuedInFuture {
        issued_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Issuer mismatch: expected '{expected}', found {found:?}")]
    IssuerMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Audience mismatch: expected '{expected}', found {found:?}")]
    AudienceMismatch {
        expected: String,
        found: Vec<String>,
    },

    #[error("Token id mismatch: expected '{expected}', found {found:?}")]
    IdMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Subject mismatch: expected '{expected}', found {found:?}")]
    SubjectMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Required claim '{0}' is missing")]
    MissingClaim(String),
}

impl ValidationFailure {
    /// The constraint that produced this failure
    pub fn constraint(&self) -> ConstraintKind {
        match self {
            ValidationFailure::Expired { .. } => ConstraintKind::NotExpired,
            ValidationFailure::NotYetValid { .. } => ConstraintKind::NotBefore,
            ValidationFailure::IssuedInFuture { .. } => ConstraintKind::IssuedBeforeNow,
            ValidationFailure::IssuerMismatch { .. } => ConstraintKind::IssuerEquals,
            ValidationFailure::AudienceMismatch { .. } => ConstraintKind::AudienceContains,
            ValidationFailure::IdMismatch { .. } => ConstraintKind::IdEquals,
            ValidationFailure::SubjectMismatch { .. } => ConstraintKind::SubjectEquals,
            ValidationFailure::MissingClaim(_) => ConstraintKind::ClaimPresent,
        }
    }
}

impl Error {
    /// Failed constraint, if this is a claim validation error
    pub fn failed_constraint(&self) -> Option<ConstraintKind> {
        match self {
            Error::ValidationFailure(failure) => Some(failure.constraint()),
            _ => None,
        }
    }
}

/// Result type alias for token operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reports_constraint() {
        let failure = ValidationFailure::Expired {
            expired_at: 10,
            now: 20,
            leeway: 0,
        };
        assert_eq!(failure.constraint(), ConstraintKind::NotExpired);

        let err: Error = failure.into();
        assert_eq!(err.failed_constraint(), Some(ConstraintKind::NotExpired));
        assert_eq!(Error::SignatureInvalid.failed_constraint(), None);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::SignatureInvalid.to_string(),
            "Signature verification failed"
        );
        assert_eq!(
            Error::UnsupportedAlgorithm("none".into()).to_string(),
            "Algorithm 'none' is not supported or not expected"
        );
        let err: Error = ValidationFailure::MissingClaim("exp".into()).into();
        assert_eq!(
            err.to_string(),
            "Claim validation failed: Required claim 'exp' is missing"
        );
    }
}
