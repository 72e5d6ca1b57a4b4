//! Candidate key generation for trial decryption.
//!
//! Decryption does not know which derivation produced a blob's key, so it
//! tries a bounded, ordered list: the current scheme first, then the legacy
//! scheme, then one key per hourly boundary across the trailing 24-hour
//! window. First match wins; the ordering beyond "current scheme first"
//! only affects how fast a match is found.

use crate::key::{derive_key, legacy_key, VaultKey};

/// Width of the trailing compatibility window, in hourly candidates.
///
/// Blobs sealed at an hourly boundary older than this window relative to
/// the decryption clock are unreachable. The width is load-bearing:
/// changing it changes which historical blobs remain readable.
pub const COMPAT_WINDOW_HOURS: i64 = 24;

/// Total candidates: current + legacy + one per window hour.
pub const CANDIDATE_COUNT: usize = 2 + COMPAT_WINDOW_HOURS as usize;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Floors a timestamp to its hourly boundary.
///
/// Seal keys are derived from the floored timestamp so that a blob stays
/// openable for the rest of its hour and across the trailing window,
/// instead of requiring a millisecond-exact clock match.
pub fn hour_floor(timestamp_ms: i64) -> i64 {
    timestamp_ms - timestamp_ms.rem_euclid(HOUR_MS)
}

/// Generates the ordered candidate key list for a principal.
///
/// Pure function of its inputs; `now_ms` anchors the hourly lattice so
/// callers (and tests) control the clock. O(24) PBKDF2 stretches per call.
pub fn candidate_keys(principal: &str, now_ms: i64) -> Vec<VaultKey> {
    let anchor = hour_floor(now_ms);
    let mut keys = Vec::with_capacity(CANDIDATE_COUNT);

    // Current derivation scheme, tried first.
    keys.push(derive_key(principal, None));

    // Legacy scheme, for blobs sealed before the PBKDF2 migration.
    keys.push(legacy_key(principal));

    // One key per hourly boundary across the trailing window.
    for i in 0..COMPAT_WINDOW_HOURS {
        keys.push(derive_key(principal, Some(anchor - i * HOUR_MS)));
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{derive_key, legacy_key};

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn produces_exactly_26_candidates() {
        let keys = candidate_keys("principal-A", NOW);
        assert_eq!(keys.len(), CANDIDATE_COUNT);
        assert_eq!(keys.len(), 26);
    }

    #[test]
    fn current_scheme_is_first_then_legacy() {
        let keys = candidate_keys("principal-A", NOW);
        assert_eq!(keys[0], derive_key("principal-A", None));
        assert_eq!(keys[1], legacy_key("principal-A"));
    }

    #[test]
    fn hourly_candidates_step_back_one_boundary_each() {
        let keys = candidate_keys("principal-A", NOW);
        let anchor = hour_floor(NOW);
        for i in 0..COMPAT_WINDOW_HOURS {
            let expected = derive_key("principal-A", Some(anchor - i * HOUR_MS));
            assert_eq!(keys[2 + i as usize], expected);
        }
    }

    #[test]
    fn candidates_are_pairwise_distinct() {
        let keys = candidate_keys("principal-A", NOW);
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a.as_bytes(), b.as_bytes());
            }
        }
    }

    #[test]
    fn lattice_is_stable_within_an_hour() {
        // Any two clock readings inside the same hour produce the same list.
        let anchor = hour_floor(NOW);
        let early = candidate_keys("principal-A", anchor + 1);
        let late = candidate_keys("principal-A", anchor + HOUR_MS - 1);
        assert_eq!(early, late);
    }

    #[test]
    fn lattice_shifts_by_one_slot_per_hour() {
        let at_now = candidate_keys("principal-A", NOW);
        let one_hour_later = candidate_keys("principal-A", NOW + HOUR_MS);
        // The boundary that was the newest hourly candidate becomes the
        // second-newest.
        assert_eq!(at_now[2], one_hour_later[3]);
    }

    #[test]
    fn hour_floor_handles_negative_timestamps() {
        assert_eq!(hour_floor(-1), -HOUR_MS);
        assert_eq!(hour_floor(0), 0);
        assert_eq!(hour_floor(HOUR_MS + 5), HOUR_MS);
    }
}
