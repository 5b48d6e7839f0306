//! The assignment store: the canonical in-memory schedule state.
//!
//! State is a map from `(date, employee)` to the ordered entries for that
//! cell. Two invariants hold at all times: no key maps to an empty sequence
//! (emptied keys are removed), and entry ids are unique within a key. All
//! mutation goes through the operations in [`mutate`]; there is no raw map
//! access, and every mutation feeds the dirty tracker.

mod mutate;

pub use mutate::DaySnapshot;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{EmployeeId, Entry};
use crate::sync::DirtyMonths;

/// Composite key addressing one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub employee: EmployeeId,
}

impl SlotKey {
    pub fn new(date: NaiveDate, employee: EmployeeId) -> Self {
        Self { date, employee }
    }
}

/// Schedule state for one session. Single-writer: operations run to
/// completion before the next one observes the map.
#[derive(Debug, Default)]
pub struct Schedule {
    slots: BTreeMap<SlotKey, Vec<Entry>>,
    dirty: DirtyMonths,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the map from loaded entries. The result starts clean: loading
    /// is not a mutation.
    pub fn from_entries<I: IntoIterator<Item = Entry>>(entries: I) -> Self {
        let mut slots: BTreeMap<SlotKey, Vec<Entry>> = BTreeMap::new();
        for entry in entries {
            let key = SlotKey::new(entry.date, entry.employee.clone());
            slots.entry(key).or_default().push(entry);
        }
        Self {
            slots,
            dirty: DirtyMonths::default(),
        }
    }

    /// Entries for one cell, empty if the key is absent.
    pub fn entries(&self, key: &SlotKey) -> &[Entry] {
        self.slots.get(key).map_or(&[], Vec::as_slice)
    }

    /// All entries on `date`, across employees, in key order.
    pub fn day_entries(&self, date: NaiveDate) -> Vec<&Entry> {
        self.slots
            .iter()
            .filter(|(key, _)| key.date == date)
            .flat_map(|(_, entries)| entries.iter())
            .collect()
    }

    pub fn all_entries(&self) -> impl Iterator<Item = &Entry> {
        self.slots.values().flatten()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn entry_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Month partitions touched since the last confirmed commit. Reading
    /// never clears; see [`Schedule::confirm_synced`].
    pub fn dirty(&self) -> &DirtyMonths {
        &self.dirty
    }

    /// Call once the external store has acknowledged a committed batch.
    pub fn confirm_synced(&mut self) {
        self.dirty.confirm_synced();
    }

    /// Remove and return a cell's entries. Marks the month dirty only when
    /// something was actually there.
    pub(crate) fn take_slot(&mut self, key: &SlotKey) -> Vec<Entry> {
        match self.slots.remove(key) {
            Some(entries) => {
                self.dirty.mark(key.date);
                entries
            }
            None => Vec::new(),
        }
    }

    /// Replace a cell's entries wholesale, dropping the key when the new
    /// sequence is empty. Always marks the month dirty.
    pub(crate) fn put_slot(&mut self, key: SlotKey, entries: Vec<Entry>) {
        self.dirty.mark(key.date);
        if entries.is_empty() {
            self.slots.remove(&key);
        } else {
            self.slots.insert(key, entries);
        }
    }

    pub(crate) fn mark_all_dirty(&mut self) {
        self.dirty.mark_all();
    }
}
