use crate::error::Result;
use crate::keys::Key;

/// A signing strategy for one algorithm
///
/// Implementations sign with the private (or shared) key and verify with the
/// public (or shared) key. A key pair verifies with its public half.
///
/// Error contract:
/// * `Ok(false)` means the signature does not match
/// * [`Error::KeyTypeMismatch`](crate::Error::KeyTypeMismatch) means the key
///   belongs to another family or curve
/// * [`Error::InvalidKey`](crate::Error::InvalidKey) means the key material
///   could not be loaded
pub trait Algorithm {
    /// The algorithm identifier (e.g., "HS256", "RS256")
    fn name(&self) -> &'static str;

    /// Sign `signing_input` (the `header.payload` bytes)
    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>>;

    /// Check a decoded signature over `signing_input`
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<bool>;
}

/// Type alias for boxed algorithm trait objects
pub type Signer = Box<dyn Algorithm + Send + Sync>;
