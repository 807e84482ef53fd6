//! Accumulation of multi-sentence AIS messages.
//!
//! Fragments are grouped by [`FragmentKey`] (sequence id, channel, fragment
//! count). An entry is removed when it is reassembled or when its most
//! recent fragment is older than the configured maximum age; expired
//! entries are dropped on every insert.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

/// Identifies the fragments of one multipart message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentKey {
    /// Sequential message id from the sentence (may be empty).
    pub sequence_id: String,
    /// Radio channel, when given.
    pub channel: Option<char>,
    /// Number of fragments the message consists of.
    pub total: u8,
}

impl FragmentKey {
    /// Key for a message of `total` fragments.
    pub fn new(sequence_id: impl Into<String>, channel: Option<char>, total: u8) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            channel,
            total,
        }
    }
}

/// The joined armored payload of a complete message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassembled {
    /// Fragment payloads concatenated in fragment-number order.
    pub payload: String,
    /// Fill bits of the final fragment.
    pub fill_bits: u8,
}

#[derive(Debug)]
struct Fragment {
    payload: String,
    fill_bits: u8,
}

#[derive(Debug)]
struct Entry {
    fragments: BTreeMap<u8, Fragment>,
    last_seen: DateTime<Utc>,
}

impl Entry {
    fn is_complete(&self, total: u8) -> bool {
        (1..=total).all(|n| self.fragments.contains_key(&n))
    }
}

/// Thread-safe table of in-flight multipart messages.
///
/// # Examples
///
/// ```
/// use ais_codec::{FragmentKey, MultipartReassembler};
///
/// let reassembler = MultipartReassembler::new(60);
/// let key = FragmentKey::new("1", Some('A'), 2);
/// reassembler.add_fragment(&key, 2, "88888888880", 2);
/// assert!(!reassembler.is_complete(&key));
/// reassembler.add_fragment(&key, 1, "55?MbV02", 0);
///
/// let message = reassembler.reassemble(&key).unwrap();
/// assert_eq!(message.payload, "55?MbV0288888888880");
/// assert_eq!(message.fill_bits, 2);
/// assert!(reassembler.reassemble(&key).is_none());
/// ```
#[derive(Debug)]
pub struct MultipartReassembler {
    entries: Mutex<HashMap<FragmentKey, Entry>>,
    max_age: Duration,
}

impl MultipartReassembler {
    /// Reassembler that drops entries idle for more than `max_age_seconds`.
    pub fn new(max_age_seconds: u64) -> Self {
        let seconds = i64::try_from(max_age_seconds).unwrap_or(i64::MAX);
        Self {
            entries: Mutex::new(HashMap::new()),
            max_age: Duration::try_seconds(seconds).unwrap_or(Duration::MAX),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<FragmentKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a fragment received now; returns the number of distinct
    /// fragments held for `key`.
    pub fn add_fragment(&self, key: &FragmentKey, number: u8, payload: &str, fill_bits: u8) -> usize {
        self.add_fragment_at(key, number, payload, fill_bits, Utc::now())
    }

    /// Record a fragment received at `now`.
    ///
    /// Fragment numbers outside `1..=total` are ignored; a repeated number
    /// replaces the earlier fragment.
    pub fn add_fragment_at(
        &self,
        key: &FragmentKey,
        number: u8,
        payload: &str,
        fill_bits: u8,
        now: DateTime<Utc>,
    ) -> usize {
        let mut entries = self.lock();
        Self::evict(&mut entries, self.max_age, now);

        if number == 0 || number > key.total {
            debug!(?key, number, "ignoring fragment outside message range");
            return entries.get(key).map_or(0, |e| e.fragments.len());
        }

        let entry = entries.entry(key.clone()).or_insert_with(|| Entry {
            fragments: BTreeMap::new(),
            last_seen: now,
        });
        entry.last_seen = now;
        entry.fragments.insert(
            number,
            Fragment {
                payload: payload.to_string(),
                fill_bits,
            },
        );
        let received = entry.fragments.len();
        debug!(?key, number, received, total = key.total, "fragment stored");
        received
    }

    /// `true` once fragments `1..=total` are all present.
    pub fn is_complete(&self, key: &FragmentKey) -> bool {
        self.lock()
            .get(key)
            .is_some_and(|entry| entry.is_complete(key.total))
    }

    /// Number of distinct fragments held for `key`.
    pub fn received(&self, key: &FragmentKey) -> usize {
        self.lock().get(key).map_or(0, |e| e.fragments.len())
    }

    /// Join a complete message and forget it.
    ///
    /// Returns `None` (and changes nothing) when the key is incomplete or
    /// was already reassembled.
    pub fn reassemble(&self, key: &FragmentKey) -> Option<Reassembled> {
        let mut entries = self.lock();
        if !entries.get(key)?.is_complete(key.total) {
            return None;
        }
        let entry = entries.remove(key)?;
        let fill_bits = entry
            .fragments
            .get(&key.total)
            .map_or(0, |last| last.fill_bits);
        let payload = entry
            .fragments
            .into_values()
            .map(|f| f.payload)
            .collect::<String>();
        debug!(?key, chars = payload.len(), "multipart message reassembled");
        Some(Reassembled { payload, fill_bits })
    }

    /// Drop entries idle for longer than the maximum age; returns how many.
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Utc::now())
    }

    /// [`evict_expired`](Self::evict_expired) against an explicit clock.
    pub fn evict_expired_at(&self, now: DateTime<Utc>) -> usize {
        Self::evict(&mut self.lock(), self.max_age, now)
    }

    fn evict(entries: &mut HashMap<FragmentKey, Entry>, max_age: Duration, now: DateTime<Utc>) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| now.signed_duration_since(entry.last_seen) <= max_age);
        let evicted = before - entries.len();
        if evicted > 0 {
            info!(evicted, pending = entries.len(), "evicted stale multipart entries");
        }
        evicted
    }

    /// Number of messages still waiting for fragments.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Forget every in-flight message.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for MultipartReassembler {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// All orderings of `items` (Heap's algorithm).
    fn permutations(items: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
        if k == 1 {
            out.push(items.clone());
            return;
        }
        permutations(items, k - 1, out);
        for i in 0..k - 1 {
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
            permutations(items, k - 1, out);
        }
    }

    #[test]
    fn every_arrival_order_reassembles_the_original() {
        let original = "55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp888888888880";
        for total in 2u8..=4 {
            let chunk = original.len().div_ceil(usize::from(total));
            let parts: Vec<&str> = original
                .as_bytes()
                .chunks(chunk)
                .map(|c| std::str::from_utf8(c).unwrap())
                .collect();
            assert_eq!(parts.len(), usize::from(total));

            let mut order: Vec<usize> = (0..parts.len()).collect();
            let mut orders = Vec::new();
            let len = order.len();
            permutations(&mut order, len, &mut orders);

            for order in orders {
                let r = MultipartReassembler::new(60);
                let key = FragmentKey::new("7", Some('B'), total);
                for (fed, &index) in order.iter().enumerate() {
                    assert!(!r.is_complete(&key), "complete after {fed} of {total}");
                    let number = u8::try_from(index + 1).unwrap();
                    let fill = if number == total { 2 } else { 0 };
                    r.add_fragment_at(&key, number, parts[index], fill, t0());
                }
                assert!(r.is_complete(&key));
                let message = r.reassemble(&key).unwrap();
                assert_eq!(message.payload, original);
                assert_eq!(message.fill_bits, 2);
            }
        }
    }

    #[test]
    fn reassemble_is_idempotent() {
        let r = MultipartReassembler::new(60);
        let key = FragmentKey::new("1", Some('A'), 2);
        r.add_fragment_at(&key, 1, "AB", 0, t0());
        assert!(r.reassemble(&key).is_none());
        assert_eq!(r.pending(), 1);
        r.add_fragment_at(&key, 2, "CD", 0, t0());
        assert!(r.reassemble(&key).is_some());
        assert!(r.reassemble(&key).is_none());
        assert_eq!(r.pending(), 0);
        assert!(!r.is_complete(&key));
    }

    #[test]
    fn duplicates_and_out_of_range_fragments() {
        let r = MultipartReassembler::new(60);
        let key = FragmentKey::new("", None, 3);
        r.add_fragment_at(&key, 1, "AA", 0, t0());
        assert_eq!(r.add_fragment_at(&key, 1, "A1", 0, t0()), 1);
        assert_eq!(r.add_fragment_at(&key, 4, "ZZ", 0, t0()), 1);
        assert_eq!(r.add_fragment_at(&key, 0, "ZZ", 0, t0()), 1);
        r.add_fragment_at(&key, 3, "CC", 0, t0());
        r.add_fragment_at(&key, 2, "BB", 0, t0());
        assert_eq!(r.reassemble(&key).unwrap().payload, "A1BBCC");
    }

    #[test]
    fn keys_do_not_collide() {
        let r = MultipartReassembler::new(60);
        let a = FragmentKey::new("1", Some('A'), 2);
        let b = FragmentKey::new("1", Some('B'), 2);
        let c = FragmentKey::new("1", Some('A'), 3);
        r.add_fragment_at(&a, 1, "a1", 0, t0());
        r.add_fragment_at(&b, 2, "b2", 0, t0());
        r.add_fragment_at(&c, 1, "c1", 0, t0());
        assert_eq!(r.pending(), 3);
        assert!(!r.is_complete(&a));
        r.add_fragment_at(&a, 2, "a2", 0, t0());
        assert_eq!(r.reassemble(&a).unwrap().payload, "a1a2");
        assert_eq!(r.received(&b), 1);
        assert_eq!(r.received(&c), 1);
    }

    #[test]
    fn stale_entries_evicted_on_next_insert() {
        let r = MultipartReassembler::new(60);
        let stale = FragmentKey::new("1", Some('A'), 2);
        let fresh = FragmentKey::new("2", Some('A'), 2);
        r.add_fragment_at(&stale, 1, "AB", 0, t0());

        // exactly at the limit: kept
        r.add_fragment_at(&fresh, 1, "XY", 0, t0() + Duration::seconds(60));
        assert_eq!(r.received(&stale), 1);

        r.add_fragment_at(&fresh, 2, "ZW", 0, t0() + Duration::seconds(61));
        assert_eq!(r.received(&stale), 0);
        assert!(!r.is_complete(&stale));

        // late second half starts a new, incomplete entry
        r.add_fragment_at(&stale, 2, "CD", 0, t0() + Duration::seconds(62));
        assert!(!r.is_complete(&stale));
        assert!(r.reassemble(&fresh).is_some());
    }

    #[test]
    fn explicit_eviction_and_clear() {
        let r = MultipartReassembler::new(10);
        r.add_fragment_at(&FragmentKey::new("1", None, 2), 1, "AB", 0, t0());
        r.add_fragment_at(&FragmentKey::new("2", None, 2), 1, "AB", 0, t0() + Duration::seconds(5));
        assert_eq!(r.evict_expired_at(t0() + Duration::seconds(12)), 1);
        assert_eq!(r.pending(), 1);
        r.clear();
        assert_eq!(r.pending(), 0);
    }
}
