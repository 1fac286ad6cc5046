use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compare a login attempt against the shared admin secret.
///
/// Both sides are hashed first so the comparison always covers 32 bytes,
/// whatever the length of the candidate.
pub fn verify(candidate: &str, secret: &str) -> bool {
    let candidate = Sha256::digest(candidate.as_bytes());
    let secret = Sha256::digest(secret.as_bytes());
    candidate.as_slice().ct_eq(secret.as_slice()).into()
}
