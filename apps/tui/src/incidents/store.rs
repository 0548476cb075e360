use std::collections::{HashSet, VecDeque};

use crate::domain::IncidentScope;
use crate::incidents::record::{IncidentKey, IncidentRecord};

/// Session-lived, newest-first incident history with no duplicate keys.
#[derive(Debug, Clone, Default)]
pub struct IncidentSequence {
    records: VecDeque<IncidentRecord>,
    keys: HashSet<IncidentKey>,
}

impl IncidentSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends every record of `incoming` whose (time, address) key is not
    /// already present, one at a time in incoming order. The batch's last
    /// novel record therefore ends up at the very front. Returns how many
    /// records were added.
    pub fn merge<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = IncidentRecord>,
    {
        let mut added = 0;
        for record in incoming {
            if self.keys.insert(record.key()) {
                self.records.push_front(record);
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &IncidentKey) -> bool {
        self.keys.contains(key)
    }

    pub fn find(&self, key: &IncidentKey) -> Option<&IncidentRecord> {
        self.records.iter().find(|record| record.matches_key(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncidentRecord> {
        self.records.iter()
    }
}

/// Functional form of [`IncidentSequence::merge`]: leaves `existing` alone and
/// returns the merged sequence.
pub fn merge<I>(existing: &IncidentSequence, incoming: I) -> IncidentSequence
where
    I: IntoIterator<Item = IncidentRecord>,
{
    let mut merged = existing.clone();
    merged.merge(incoming);
    merged
}

/// The priority and full sequences, deduplicated independently.
#[derive(Debug, Clone, Default)]
pub struct IncidentStore {
    pub priority: IncidentSequence,
    pub full: IncidentSequence,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one dispatch response into both sequences; returns the number of
    /// records added to (priority, full).
    pub fn ingest(
        &mut self,
        priority: Vec<IncidentRecord>,
        full: Option<Vec<IncidentRecord>>,
    ) -> (usize, usize) {
        let full = full.unwrap_or_else(|| priority.clone());
        let added_priority = self.priority.merge(priority);
        let added_full = self.full.merge(full);
        (added_priority, added_full)
    }

    pub const fn sequence(&self, scope: IncidentScope) -> &IncidentSequence {
        match scope {
            IncidentScope::Priority => &self.priority,
            IncidentScope::Full => &self.full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(time: &str, address: &str) -> IncidentRecord {
        IncidentRecord {
            time: Some(time.to_string()),
            location: Some(address.to_string()),
            ..IncidentRecord::default()
        }
    }

    fn times(sequence: &IncidentSequence) -> Vec<&str> {
        sequence.iter().map(IncidentRecord::time_text).collect()
    }

    #[test]
    fn last_novel_record_ends_up_first() {
        let mut sequence = IncidentSequence::new();
        sequence.merge(vec![incident("01:00", "A")]);
        let added = sequence.merge(vec![incident("02:00", "B"), incident("03:00", "C")]);

        assert_eq!(added, 2);
        assert_eq!(times(&sequence), vec!["03:00", "02:00", "01:00"]);
    }

    #[test]
    fn duplicate_leaves_length_and_order_unchanged() {
        let mut sequence = IncidentSequence::new();
        sequence.merge(vec![incident("01:00", "A"), incident("02:00", "B")]);
        let before = times(&sequence)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut repeat = incident("01:00", "A");
        repeat.agency = Some("PD".to_string());
        let added = sequence.merge(vec![repeat]);

        assert_eq!(added, 0);
        assert_eq!(sequence.len(), 2);
        assert_eq!(times(&sequence), before);
    }

    #[test]
    fn duplicates_inside_one_batch_are_dropped() {
        let mut sequence = IncidentSequence::new();
        let added = sequence.merge(vec![incident("01:00", "A"), incident("01:00", "A")]);
        assert_eq!(added, 1);
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn sequential_merges_equal_one_merge_of_concatenation() {
        let first = vec![incident("01:00", "A"), incident("02:00", "B")];
        let second = vec![incident("03:00", "C"), incident("04:00", "D")];

        let mut stepwise = IncidentSequence::new();
        stepwise.merge(first.clone());
        stepwise.merge(second.clone());

        let combined = merge(
            &IncidentSequence::new(),
            first.into_iter().chain(second),
        );

        assert_eq!(times(&stepwise), times(&combined));
    }

    #[test]
    fn functional_merge_leaves_input_untouched() {
        let existing = merge(&IncidentSequence::new(), vec![incident("01:00", "A")]);
        let merged = merge(&existing, vec![incident("02:00", "B")]);
        assert_eq!(existing.len(), 1);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn missing_fields_still_dedupe() {
        let mut sequence = IncidentSequence::new();
        sequence.merge(vec![IncidentRecord::default(), IncidentRecord::default()]);
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn store_dedupes_sequences_independently() {
        let mut store = IncidentStore::new();
        let (p, f) = store.ingest(
            vec![incident("01:00", "A")],
            Some(vec![incident("01:00", "A"), incident("01:05", "B")]),
        );
        assert_eq!((p, f), (1, 2));

        let (p, f) = store.ingest(vec![incident("01:05", "B")], Some(Vec::new()));
        assert_eq!((p, f), (1, 0));
        assert_eq!(store.priority.len(), 2);
        assert_eq!(store.full.len(), 2);
    }

    #[test]
    fn missing_full_batch_falls_back_to_priority() {
        let mut store = IncidentStore::new();
        store.ingest(vec![incident("01:00", "A")], None);
        assert!(store.full.contains(&incident("01:00", "A").key()));
    }

    #[test]
    fn find_returns_stored_record() {
        let mut sequence = IncidentSequence::new();
        sequence.merge(vec![incident("01:00", "A")]);
        let key = incident("01:00", "A").key();
        assert!(sequence.find(&key).is_some());
        assert!(sequence.find(&incident("01:00", "Z").key()).is_none());
    }
}
