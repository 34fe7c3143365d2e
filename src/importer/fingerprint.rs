// ==========================================
// Carga de pedidos - content fingerprint
// ==========================================
// SHA-256 over the raw upload bytes. The pair (idempotency_key, hash)
// is the admission-control key: same token + different bytes is a
// legitimate new submission.
// ==========================================

use sha2::{Digest, Sha256};

/// Compute the content fingerprint of an upload: SHA-256, lowercase hex.
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
