// src/backend/utils/crypto.rs

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::models::common::{ItemId, TimestampNs};
use crate::utils::rng::with_internal_rng;
use crate::utils::time::NANOS_PER_MILLI;

const ITEM_ID_SUFFIX_LEN: usize = 9;

/// Generates a list-item identifier: the creation time in base-36 milliseconds followed by
/// nine random lowercase alphanumerics. Ids sort roughly by creation time.
pub fn generate_item_id(now_ns: TimestampNs) -> ItemId {
    let suffix: String = with_internal_rng(|rng| {
        (0..ITEM_ID_SUFFIX_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
            .collect()
    });
    format!("{}{}", to_base36(now_ns / NANOS_PER_MILLI), suffix)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Calculates the SHA256 hash of byte data and returns it as a hex string.
pub fn calculate_sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
