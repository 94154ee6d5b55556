//! Record identifier generation.
//!
//! # Responsibility
//! - Produce collision-resistant opaque identifiers for new records.
//!
//! # Invariants
//! - Generation never fails; when the OS random source is unavailable a
//!   timestamp + noise composite is returned instead of a UUID.
//! - Identifiers are opaque strings: callers must not parse them.

use log::warn;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Builder;

/// Opaque record identifier shared by tasks, todos and events.
///
/// Kept as a type alias so imported documents with foreign identifier
/// shapes (e.g. `task-1`) remain representable.
pub type RecordId = String;

static FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generates a new random record identifier.
///
/// Returns a hyphenated v4 UUID when the OS random source is reachable.
pub fn generate_id() -> RecordId {
    let mut bytes = [0_u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => Builder::from_random_bytes(bytes).into_uuid().to_string(),
        Err(err) => {
            warn!(
                "event=id_generate module=model status=fallback error={}",
                err
            );
            fallback_id()
        }
    }
}

fn fallback_id() -> RecordId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    let sequence = FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    // Each RandomState carries a fresh per-process seed.
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(millis);
    hasher.write_u64(sequence);

    format!("{}-{:x}", to_base36(millis), hasher.finish())
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }

    let mut encoded = Vec::new();
    while value > 0 {
        encoded.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    encoded.reverse();
    String::from_utf8_lossy(&encoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::{fallback_id, generate_id, to_base36};
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn generated_ids_are_v4_uuids() {
        let id = generate_id();
        let parsed = Uuid::parse_str(&id).expect("generated id should be a uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..256).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn fallback_ids_are_composite_and_distinct() {
        let first = fallback_id();
        let second = fallback_id();
        assert_ne!(first, second);
        assert_eq!(first.split('-').count(), 2);
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
