// Internal modules
mod builder;
mod header;
mod parsed;
#[allow(clippy::module_inception)]
mod token;
mod verified;

// Public API exports
pub use builder::TokenBuilder;
pub use header::{Header, TOKEN_TYPE};
pub use parsed::{parse, UnverifiedToken};
pub use token::Token;
pub use verified::VerifiedToken;
