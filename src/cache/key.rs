//! Cache key derivation.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

static UNSAFE_KEY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-]").expect("valid key pattern"));

/// Reduce `raw` to a safe cache identifier.
///
/// Colons become underscores, then everything but ASCII letters, digits,
/// `_` and `-` is dropped.
pub fn transient_key(raw: &str) -> String {
    let raw = raw.replace(':', "_");
    UNSAFE_KEY_CHARS.replace_all(&raw, "").into_owned()
}

/// Key for a public set query.
pub fn public_key(set: &str, scope: &str) -> String {
    transient_key(&format!("{}:{}", set, scope))
}

/// Key for a private set query.
///
/// Sanitizing is lossy, so the account part of the key is a SHA-256 digest
/// over the raw user name and API key. Two accounts never share an entry,
/// and entries cached under a replaced API key are no longer reachable.
pub fn private_key(user: &str, api_key: &str, set: &str, scope: &str) -> String {
    let mut hasher = Sha256::new();
    for part in [user, api_key, set, scope] {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part.as_bytes());
    }
    let account = hex::encode(hasher.finalize());
    transient_key(&format!("{}:{}_{}", set, scope, account))
}
