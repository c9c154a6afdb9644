//! Size limit constants for input validation

/// Maximum length for a token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes; nothing supported is larger
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum length for the algorithm (alg) header field
pub(crate) const MAX_ALG_LENGTH: usize = 16;
