use sha2::{Digest, Sha256};

/// Deterministic one-way digest of a credential, as lowercase hex.
///
/// The same digest is stored on create and recomputed on login, where the
/// comparison happens inside the storage query.
pub fn hash_password(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}
