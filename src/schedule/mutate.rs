use chrono::NaiveDate;

use super::{Schedule, SlotKey};
use crate::guard::{ClearToken, Confirmed};
use crate::model::{EmployeeId, Entry, EntryId, ShiftTypeId};

/// Ephemeral copy of one date's full cross-employee entry set, used to
/// replicate a day elsewhere. Never persisted.
#[derive(Debug, Clone)]
pub struct DaySnapshot {
    pub source_date: NaiveDate,
    entries: Vec<Entry>,
}

impl DaySnapshot {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Schedule {
    /// Append a fresh entry to a cell. Stacking several entries — even of the
    /// same type — on one cell is allowed; real rosters double-book.
    pub fn add_entry(
        &mut self,
        date: NaiveDate,
        employee: EmployeeId,
        shift_type: ShiftTypeId,
        note: Option<String>,
    ) -> Entry {
        let mut entry = Entry::new(date, employee.clone(), shift_type);
        entry.note = note;
        let key = SlotKey::new(date, employee);
        let mut entries = self.take_slot(&key);
        entries.push(entry.clone());
        self.put_slot(key, entries);
        entry
    }

    /// Remove one entry by id within a cell. Idempotent: a miss (unknown key
    /// or id) is a no-op, not an error. Returns whether anything was removed.
    pub fn remove_entry(&mut self, key: &SlotKey, id: &EntryId) -> bool {
        if !self.entries(key).iter().any(|e| &e.id == id) {
            return false;
        }
        let mut entries = self.take_slot(key);
        entries.retain(|e| &e.id != id);
        self.put_slot(key.clone(), entries);
        true
    }

    /// Snapshot every entry on `date`, across all employees.
    pub fn copy_day(&self, date: NaiveDate) -> DaySnapshot {
        DaySnapshot {
            source_date: date,
            entries: self.day_entries(date).into_iter().cloned().collect(),
        }
    }

    /// Replace the whole of `target` with re-identified copies of the
    /// snapshot. Destructive: entries already on `target` are dropped even
    /// for employees absent from the snapshot. Employee references are kept,
    /// dates rewritten, ids regenerated.
    pub fn paste_day(&mut self, snapshot: &DaySnapshot, target: NaiveDate, _confirm: Confirmed) {
        self.slots.retain(|key, _| key.date != target);

        for entry in &snapshot.entries {
            let mut copy = entry.clone();
            copy.id = EntryId::random();
            copy.date = target;
            let key = SlotKey::new(target, copy.employee.clone());
            self.slots.entry(key).or_default().push(copy);
        }
        self.dirty.mark(target);

        tracing::info!(
            source = %snapshot.source_date,
            target = %target,
            entries = snapshot.entries.len(),
            "pasted day"
        );
    }

    /// Empty the entire schedule. Irreversible, hence the double gate: the
    /// passphrase token plus the interactive confirmation.
    pub fn clear_all(&mut self, _token: ClearToken, _confirm: Confirmed) {
        self.slots.clear();
        self.mark_all_dirty();
        tracing::info!("cleared entire schedule");
    }

    /// Apply generator output: each produced cell is overwritten with its
    /// generated entries. Days where the pattern produced a hole are simply
    /// absent here, so whatever they held stays untouched.
    pub fn apply_generated(&mut self, generated: Vec<Entry>) {
        let mut by_key: std::collections::BTreeMap<SlotKey, Vec<Entry>> =
            std::collections::BTreeMap::new();
        for entry in generated {
            let key = SlotKey::new(entry.date, entry.employee.clone());
            by_key.entry(key).or_default().push(entry);
        }
        let cells = by_key.len();
        for (key, entries) in by_key {
            self.put_slot(key, entries);
        }
        tracing::debug!(cells, "applied generated entries");
    }
}
