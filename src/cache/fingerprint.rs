use sha2::{Digest, Sha256};

/// Cache key for one operation call: `prefix` followed by the hex SHA-256 of the
/// operation name and its ordered arguments.
///
/// Every part is written as `<byte length>:<bytes>` so argument tuples that would
/// concatenate to the same string still hash differently.
pub fn cache_key(prefix: &str, operation: &str, args: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in std::iter::once(operation).chain(args.iter().copied()) {
        hasher.update(part.len().to_string().as_bytes());
        hasher.update(b":");
        hasher.update(part.as_bytes());
    }
    format!("{}{:x}", prefix, hasher.finalize())
}
