use std::collections::HashMap;
use std::fmt;

use crate::algorithm::{Algorithm, AlgorithmId, Signer};
use crate::error::{Error, Result};

/// Maps algorithm identifiers to signing strategies
///
/// Built once and read-only afterwards; share it behind an `Arc` or a
/// reference across threads.
pub struct SignerRegistry {
    signers: HashMap<AlgorithmId, Signer>,
}

impl SignerRegistry {
    /// Registry with every algorithm compiled into this build
    pub fn new() -> Self {
        Self::allow_only(&AlgorithmId::all())
    }

    /// Registry restricted to the given algorithms
    pub fn allow_only(algorithms: &[AlgorithmId]) -> Self {
        let signers = algorithms.iter().map(|alg| (*alg, alg.signer())).collect();
        Self { signers }
    }

    /// Look up the strategy for a registered algorithm
    pub fn get(&self, algorithm: &AlgorithmId) -> Result<&dyn Algorithm> {
        self.signers
            .get(algorithm)
            .map(|signer| &**signer as &dyn Algorithm)
            .ok_or_else(|| Error::UnsupportedAlgorithm(algorithm.to_string()))
    }

    /// Look up the strategy for an algorithm name as found in a header
    pub fn resolve(&self, name: &str) -> Result<&dyn Algorithm> {
        let algorithm = AlgorithmId::from_str(name)?;
        self.get(&algorithm)
    }

    pub fn contains(&self, algorithm: &AlgorithmId) -> bool {
        self.signers.contains_key(algorithm)
    }

    /// Registered algorithms in declaration order
    pub fn algorithms(&self) -> Vec<AlgorithmId> {
        AlgorithmId::all()
            .into_iter()
            .filter(|alg| self.signers.contains_key(alg))
            .collect()
    }
}

impl Default for SignerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SignerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerRegistry")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}
