//! Key Ring
//!
//! The in-memory list of records and the pure mutations on it.
//! Nothing here touches storage; `RecordStore` pairs each mutation
//! with a write.

use serde::Serialize;

use crate::error::{KeyringError, KeyringResult};
use crate::vault::record::{KeyringRecord, RecordField};

/// Hard cap on the number of records in a key ring
pub const MAX_RECORDS: usize = 20;

/// Result of trying to append a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddOutcome {
    Added { id: u32 },
    AtCapacity,
    /// Every id up to `u32::MAX` has been handed out
    IdsExhausted,
}

/// Ordered list of records, insertion order
///
/// `next_id` is a high-water mark: it only moves forward, so an id is never
/// handed out twice while the ring lives. `None` once `u32::MAX` was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRing {
    records: Vec<KeyringRecord>,
    next_id: Option<u32>,
}

impl Default for KeyRing {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: Some(0),
        }
    }
}

impl KeyRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing list, keeping at most `MAX_RECORDS` entries
    ///
    /// The high-water mark starts one past the highest stored id.
    pub fn from_records(mut records: Vec<KeyringRecord>) -> Self {
        records.truncate(MAX_RECORDS);
        let next_id = match records.iter().map(|r| r.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        };
        Self { records, next_id }
    }

    pub fn records(&self) -> &[KeyringRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= MAX_RECORDS
    }

    pub fn get(&self, index: usize) -> Option<&KeyringRecord> {
        self.records.get(index)
    }

    /// Appends a blank record unless the ring is full or out of ids
    pub fn add(&mut self) -> AddOutcome {
        if self.is_full() {
            return AddOutcome::AtCapacity;
        }
        let Some(id) = self.next_id else {
            return AddOutcome::IdsExhausted;
        };
        self.next_id = id.checked_add(1);
        self.records.push(KeyringRecord::blank(id));
        AddOutcome::Added { id }
    }

    /// Removes the record at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> KeyringResult<KeyringRecord> {
        self.check_index(index)?;
        Ok(self.records.remove(index))
    }

    pub fn toggle_open(&mut self, index: usize) -> KeyringResult<()> {
        let record = self.record_mut(index)?;
        record.is_open = !record.is_open;
        Ok(())
    }

    pub fn set_field(
        &mut self,
        index: usize,
        field: RecordField,
        value: impl Into<String>,
    ) -> KeyringResult<()> {
        self.record_mut(index)?.set_field(field, value.into());
        Ok(())
    }

    /// Collapses and locks the record. No validation of its contents.
    pub fn save(&mut self, index: usize) -> KeyringResult<()> {
        let record = self.record_mut(index)?;
        record.is_open = false;
        record.is_locked = true;
        Ok(())
    }

    pub fn toggle_important(&mut self, index: usize) -> KeyringResult<()> {
        let record = self.record_mut(index)?;
        record.is_important = !record.is_important;
        Ok(())
    }

    fn check_index(&self, index: usize) -> KeyringResult<()> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(KeyringError::index_out_of_range(index, self.records.len()))
        }
    }

    fn record_mut(&mut self, index: usize) -> KeyringResult<&mut KeyringRecord> {
        let count = self.records.len();
        self.records
            .get_mut(index)
            .ok_or_else(|| KeyringError::index_out_of_range(index, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_with(count: usize) -> KeyRing {
        let mut ring = KeyRing::new();
        for _ in 0..count {
            ring.add();
        }
        ring
    }

    #[test]
    fn add_to_empty_ring_creates_blank_record() {
        let mut ring = KeyRing::new();

        assert_eq!(ring.add(), AddOutcome::Added { id: 0 });
        assert_eq!(ring.len(), 1);

        let record = ring.get(0).unwrap();
        assert_eq!(record.account_number, "");
        assert_eq!(record.password, "");
        assert!(!record.is_locked);
        assert!(!record.is_open);
        assert!(!record.is_important);
    }

    #[test]
    fn add_at_capacity_is_a_no_op() {
        let mut ring = ring_with(MAX_RECORDS);
        let before = ring.clone();

        assert_eq!(ring.add(), AddOutcome::AtCapacity);
        assert_eq!(ring.len(), MAX_RECORDS);
        assert_eq!(ring, before);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut ring = ring_with(4);

        let removed = ring.remove(1).unwrap();

        assert_eq!(removed.id, 1);
        let ids: Vec<u32> = ring.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let mut ring = ring_with(3);
        ring.remove(0).unwrap();

        assert_eq!(ring.add(), AddOutcome::Added { id: 3 });

        let mut ids: Vec<u32> = ring.records().iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn removing_newest_record_does_not_recycle_its_id() {
        let mut ring = ring_with(3);
        ring.remove(2).unwrap();

        assert_eq!(ring.add(), AddOutcome::Added { id: 3 });
        let ids: Vec<u32> = ring.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 3]);
    }

    #[test]
    fn max_stored_id_exhausts_new_ids() {
        let mut top = KeyringRecord::blank(u32::MAX);
        top.account_number = "last".to_string();
        let mut ring = KeyRing::from_records(vec![KeyringRecord::blank(0), top]);
        let before = ring.clone();

        assert_eq!(ring.add(), AddOutcome::IdsExhausted);
        assert_eq!(ring, before);
    }

    #[test]
    fn issuing_the_last_id_stops_further_adds() {
        let mut ring = KeyRing::from_records(vec![KeyringRecord::blank(u32::MAX - 1)]);

        assert_eq!(ring.add(), AddOutcome::Added { id: u32::MAX });
        assert_eq!(ring.add(), AddOutcome::IdsExhausted);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn toggle_open_twice_restores_state() {
        let mut ring = ring_with(2);

        ring.toggle_open(1).unwrap();
        assert!(ring.get(1).unwrap().is_open);

        ring.toggle_open(1).unwrap();
        assert!(!ring.get(1).unwrap().is_open);
        assert!(!ring.get(0).unwrap().is_open);
    }

    #[test]
    fn save_collapses_and_locks() {
        let mut ring = ring_with(1);
        ring.toggle_open(0).unwrap();

        ring.save(0).unwrap();

        let record = ring.get(0).unwrap();
        assert!(!record.is_open);
        assert!(record.is_locked);
    }

    #[test]
    fn set_field_replaces_only_the_named_field() {
        let mut ring = ring_with(1);

        ring.set_field(0, RecordField::AccountNumber, "alice").unwrap();
        ring.set_field(0, RecordField::Password, "x7Q!").unwrap();
        ring.set_field(0, RecordField::Password, "x7Q!z").unwrap();

        let record = ring.get(0).unwrap();
        assert_eq!(record.account_number, "alice");
        assert_eq!(record.password, "x7Q!z");
    }

    #[test]
    fn toggle_important_flips_flag() {
        let mut ring = ring_with(1);

        ring.toggle_important(0).unwrap();
        assert!(ring.get(0).unwrap().is_important);

        ring.toggle_important(0).unwrap();
        assert!(!ring.get(0).unwrap().is_important);
    }

    #[test]
    fn out_of_range_index_is_rejected_without_change() {
        let mut ring = ring_with(2);
        let before = ring.clone();

        let err = ring.toggle_open(2).expect_err("index 2 of 2");
        assert!(matches!(
            err,
            KeyringError::IndexOutOfRange { index: 2, count: 2 }
        ));
        assert!(ring.remove(5).is_err());
        assert!(ring.save(2).is_err());
        assert_eq!(ring, before);
    }

    #[test]
    fn from_records_truncates_to_capacity() {
        let records = (0..25).map(KeyringRecord::blank).collect();
        let ring = KeyRing::from_records(records);

        assert_eq!(ring.len(), MAX_RECORDS);
        assert_eq!(ring.records().last().unwrap().id, 19);
    }
}
