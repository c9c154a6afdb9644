use crate::claims::ClaimSet;
use crate::error::{ConstraintKind, ValidationFailure};
use crate::utils::current_timestamp;

/// A single rule a claim set must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `iss` is present and equal
    IssuerEquals(String),
    /// `aud` is present and contains the value
    AudienceContains(String),
    /// `jti` is present and equal
    IdEquals(String),
    /// `sub` is present and equal
    SubjectEquals(String),
    /// `exp`, when present, is after the reference time
    NotExpired,
    /// `nbf`, when present, is not after the reference time
    NotBefore,
    /// `iat`, when present, is not after the reference time
    IssuedBeforeNow,
    /// The named claim is present
    ClaimPresent(String),
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::IssuerEquals(_) => ConstraintKind::IssuerEquals,
            Constraint::AudienceContains(_) => ConstraintKind::AudienceContains,
            Constraint::IdEquals(_) => ConstraintKind::IdEquals,
            Constraint::SubjectEquals(_) => ConstraintKind::SubjectEquals,
            Constraint::NotExpired => ConstraintKind::NotExpired,
            Constraint::NotBefore => ConstraintKind::NotBefore,
            Constraint::IssuedBeforeNow => ConstraintKind::IssuedBeforeNow,
            Constraint::ClaimPresent(_) => ConstraintKind::ClaimPresent,
        }
    }

    /// Two constraints occupy the same slot if a claim set can only be held
    /// to one of them at a time
    fn same_slot(&self, other: &Constraint) -> bool {
        match (self, other) {
            (Constraint::ClaimPresent(a), Constraint::ClaimPresent(b)) => a == b,
            _ => self.kind() == other.kind(),
        }
    }

    fn check(&self, claims: &ClaimSet, now: i64, leeway: u64) -> Result<(), ValidationFailure> {
        // Leeway widens every time window by the same amount
        let leeway_i64 = i64::try_from(leeway).unwrap_or(i64::MAX);

        match self {
            Constraint::IssuerEquals(expected) => match claims.issuer() {
                Some(found) if found == expected => Ok(()),
                found => Err(ValidationFailure::IssuerMismatch {
                    expected: expected.clone(),
                    found: found.map(str::to_string),
                }),
            },
            Constraint::AudienceContains(expected) => {
                let audience = claims.audience();
                if audience.iter().any(|aud| aud == expected) {
                    Ok(())
                } else {
                    Err(ValidationFailure::AudienceMismatch {
                        expected: expected.clone(),
                        found: audience.into_iter().map(str::to_string).collect(),
                    })
                }
            }
            Constraint::IdEquals(expected) => match claims.jwt_id() {
                Some(found) if found == expected => Ok(()),
                found => Err(ValidationFailure::IdMismatch {
                    expected: expected.clone(),
                    found: found.map(str::to_string),
                }),
            },
            Constraint::SubjectEquals(expected) => match claims.subject() {
                Some(found) if found == expected => Ok(()),
                found => Err(ValidationFailure::SubjectMismatch {
                    expected: expected.clone(),
                    found: found.map(str::to_string),
                }),
            },
            Constraint::NotExpired => match claims.expiration() {
                Some(exp) if exp.saturating_add(leeway_i64) <= now => {
                    Err(ValidationFailure::Expired {
                        expired_at: exp,
                        now,
                        leeway,
                    })
                }
                _ => Ok(()),
            },
            Constraint::NotBefore => match claims.not_before() {
                Some(nbf) if nbf > now.saturating_add(leeway_i64) => {
                    Err(ValidationFailure::NotYetValid {
                        not_before: nbf,
                        now,
                        leeway,
                    })
                }
                _ => Ok(()),
            },
            Constraint::IssuedBeforeNow => match claims.issued_at() {
                Some(iat) if iat > now.saturating_add(leeway_i64) => {
                    Err(ValidationFailure::IssuedInFuture {
                        issued_at: iat,
                        now,
                        leeway,
                    })
                }
                _ => Ok(()),
            },
            Constraint::ClaimPresent(name) => {
                if claims.contains(name) {
                    Ok(())
                } else {
                    Err(ValidationFailure::MissingClaim(name.clone()))
                }
            }
        }
    }
}

/// Constraints plus the reference time a claim set is judged at
///
/// [`ValidationData::new`] starts with the three time constraints
/// (not-expired, not-before, issued-before-now) at the current time. Absent
/// time claims pass; use [`require`](Self::require) to insist on one.
///
/// # Example
///
/// ```ignore
/// let data = ValidationData::new()
///     .issuer("http://example.com")
///     .audience("http://example.org")
///     .id("4f1g23a12aa")
///     .require("exp");
///
/// validate(&claims, &data)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationData {
    constraints: Vec<Constraint>,
    current_time: i64,
    leeway: u64,
}

impl Default for ValidationData {
    fn default() -> Self {
        Self {
            constraints: vec![
                Constraint::NotExpired,
                Constraint::NotBefore,
                Constraint::IssuedBeforeNow,
            ],
            current_time: current_timestamp(),
            leeway: 0,
        }
    }
}

impl ValidationData {
    /// Time constraints at the current time, no leeway
    pub fn new() -> Self {
        Self::default()
    }

    /// No constraints at all, at the current time
    pub fn empty() -> Self {
        Self {
            constraints: Vec::new(),
            ..Self::default()
        }
    }

    /// Judge claims at a fixed time instead of now
    pub fn current_time(mut self, timestamp: i64) -> Self {
        self.current_time = timestamp;
        self
    }

    /// Allowed clock difference in seconds for `exp`, `nbf` and `iat`
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }

    /// Require `iss` to equal `issuer`
    pub fn issuer(self, issuer: impl Into<String>) -> Self {
        self.constraint(Constraint::IssuerEquals(issuer.into()))
    }

    /// Require `aud` to contain `audience`
    pub fn audience(self, audience: impl Into<String>) -> Self {
        self.constraint(Constraint::AudienceContains(audience.into()))
    }

    /// Require `jti` to equal `id`
    pub fn id(self, id: impl Into<String>) -> Self {
        self.constraint(Constraint::IdEquals(id.into()))
    }

    /// Require `sub` to equal `subject`
    pub fn subject(self, subject: impl Into<String>) -> Self {
        self.constraint(Constraint::SubjectEquals(subject.into()))
    }

    /// Require the claim to be present
    pub fn require(self, claim: impl Into<String>) -> Self {
        self.constraint(Constraint::ClaimPresent(claim.into()))
    }

    /// Add a constraint
    ///
    /// A constraint of the same kind (same claim for presence checks) is
    /// replaced where it stands; anything else is appended.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        match self
            .constraints
            .iter_mut()
            .find(|existing| existing.same_slot(&constraint))
        {
            Some(existing) => *existing = constraint,
            None => self.constraints.push(constraint),
        }
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn reference_time(&self) -> i64 {
        self.current_time
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.leeway
    }
}

/// Check every constraint in order, stopping at the first failure
pub fn validate(claims: &ClaimSet, data: &ValidationData) -> Result<(), ValidationFailure> {
    for constraint in &data.constraints {
        constraint.check(claims, data.current_time, data.leeway)?;
    }
    Ok(())
}
