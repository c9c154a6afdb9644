//! # bearjwt - Issue and verify compact signed tokens
//!
//! **bearjwt** issues and verifies JSON Web Tokens in their compact form
//! (`header.payload.signature`, each segment unpadded Base64URL) and checks
//! their claims against configurable rules. It is built for bearer
//! authentication: one service signs, others verify with no shared session
//! store.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bearjwt::*;
//!
//! let engine = Engine::new(SignerRegistry::new(), AlgorithmId::HS256, Key::symmetric("secret"))?;
//!
//! let token = engine.issue(
//!     engine.builder()
//!         .issuer("http://example.com")
//!         .audience("http://example.org")
//!         .expires_at(now + 3600)
//!         .claim("uid", 1),
//! )?;
//!
//! let claims = engine.load_and_verify(
//!     token.as_str(),
//!     &engine.validation_data().issuer("http://example.com"),
//! )?;
//! println!("uid: {:?}", claims.get("uid"));
//! ```
//!
//! ## Verification Flow
//!
//! Tokens move through typed states; claims are only handed out at the end:
//!
//! ```text
//! &str
//!     │ parse()
//!     ▼
//! UnverifiedToken (structure checked; nothing trusted)
//!     │ .verify(signer, key)
//!     ▼
//! VerifiedToken (signature checked)
//!     │ .validate(&ValidationData)
//!     ▼
//! ClaimSet
//! ```
//!
//! [`load_and_verify`] and [`Engine::load_and_verify`] run all three steps.
//!
//! ## Algorithm Support
//!
//! All algorithms implement a common [`Algorithm`] trait with `sign` and
//! `verify`:
//!
//! - **HMAC** (always enabled): HS256, HS384, HS512
//! - **RSA** (with `rsa` feature): RS256, RS384, RS512
//! - **ECDSA** (with `ecdsa` feature): ES256, ES384
//!
//! ## Claims Validation
//!
//! ```ignore
//! ValidationData::new()                 // exp, nbf, iat checked at the current time
//!     .issuer("http://example.com")     // iss must equal
//!     .audience("http://example.org")   // aud must contain
//!     .id("4f1g23a12aa")                // jti must equal
//!     .require("exp")                   // exp must be present
//!     .leeway(30)                       // allow 30s clock skew
//! ```
//!
//! Constraints run in the order they were added and stop at the first
//! failure. Time claims that are absent pass unless required.
//!
//! ## Security
//!
//! - The algorithm in a token header must be exactly the one the verifier
//!   expects. `"none"` is never accepted, in any casing.
//! - HMAC tags are compared in constant time via
//!   [`constant_time_eq`](https://crates.io/crates/constant_time_eq).
//! - A key of the wrong family or curve is a `KeyTypeMismatch`, never a silent
//!   verification failure.
//! - [`BearerAuth`] answers every rejected credential with the same challenge.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519): JSON Web Token (JWT)
//! - [RFC 6750](https://datatracker.ietf.org/doc/html/rfc6750): Bearer Token Usage

pub mod algorithm;
pub mod bearer;
pub mod claims;
pub mod engine;
pub mod error;
pub mod keys;
mod limits;
pub mod token;
pub mod utils;

pub use algorithm::{Algorithm, AlgorithmId, Signer, SignerRegistry};
pub use bearer::BearerAuth;
pub use claims::{validate, ClaimSet, ClaimValue, Constraint, ValidationData};
pub use engine::{load_and_verify, Engine};
pub use error::{ConstraintKind, Error, Result, ValidationFailure};
pub use keys::{EcdsaCurve, Key};
pub use token::{parse, Header, Token, TokenBuilder, UnverifiedToken, VerifiedToken};
