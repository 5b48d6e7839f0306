//! Two-selection swap engine over the schedule.
//!
//! Users pick two cells, then resolve by designating which side is the
//! petitioner (the party asking for time off). Equal dates resolve as a
//! same-day exchange (permuta); different dates as a cross-day transfer that
//! leaves the petitioner a "Folga por Troca" placeholder.

use thiserror::Error;

use crate::model::{Entry, EntryId, ShiftTypeId, TRANSFER_PLACEHOLDER_ID};
use crate::schedule::{Schedule, SlotKey};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SwapError {
    #[error("two selections are required before resolving")]
    NotReady,
    #[error("petitioner has no shift to hand over")]
    NothingToTransfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapState {
    Idle,
    OnePicked,
    ReadyToResolve,
}

/// Which of the two selections is the petitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Petitioner {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Same-day wholesale exchange between the two employees.
    Exchanged { first: SlotKey, second: SlotKey },
    /// Cross-day transfer; `moved` counts the entries cloned to the acceptor.
    Transferred {
        petitioner: SlotKey,
        acceptor: SlotKey,
        moved: usize,
    },
}

/// Sliding-window selection machine: holds at most two picks, a third pick
/// evicts the oldest. Transitions never touch the schedule; only
/// [`SwapSession::resolve`] mutates, and it does so atomically.
#[derive(Debug, Default)]
pub struct SwapSession {
    picks: Vec<SlotKey>,
}

impl SwapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SwapState {
        match self.picks.len() {
            0 => SwapState::Idle,
            1 => SwapState::OnePicked,
            _ => SwapState::ReadyToResolve,
        }
    }

    pub fn selections(&self) -> &[SlotKey] {
        &self.picks
    }

    /// Select a cell, or deselect it if it was already picked.
    pub fn toggle(&mut self, key: SlotKey) {
        if let Some(pos) = self.picks.iter().position(|k| k == &key) {
            self.picks.remove(pos);
            return;
        }
        if self.picks.len() == 2 {
            self.picks.remove(0);
        }
        self.picks.push(key);
    }

    /// Drop all selections without mutating the schedule.
    pub fn cancel(&mut self) {
        self.picks.clear();
    }

    /// Resolve the two selections against the schedule. On success the
    /// session returns to idle; on failure the schedule is untouched and the
    /// selections are kept.
    pub fn resolve(
        &mut self,
        schedule: &mut Schedule,
        petitioner: Petitioner,
    ) -> Result<SwapOutcome, SwapError> {
        if self.picks.len() != 2 {
            return Err(SwapError::NotReady);
        }
        let (pet, acc) = match petitioner {
            Petitioner::First => (self.picks[0].clone(), self.picks[1].clone()),
            Petitioner::Second => (self.picks[1].clone(), self.picks[0].clone()),
        };

        let outcome = if pet.date == acc.date {
            exchange_same_day(schedule, &pet, &acc);
            SwapOutcome::Exchanged {
                first: pet,
                second: acc,
            }
        } else {
            let moved = transfer_cross_day(schedule, &pet, &acc)?;
            SwapOutcome::Transferred {
                petitioner: pet,
                acceptor: acc,
                moved,
            }
        };

        self.picks.clear();
        Ok(outcome)
    }
}

/// Swap the two cells' entry sequences wholesale, re-pointing each entry at
/// its new employee and flagging it exchange-origin. Dates are equal by
/// construction. An emptied side loses its key rather than keeping an empty
/// sequence.
fn exchange_same_day(schedule: &mut Schedule, a: &SlotKey, b: &SlotKey) {
    let from_a = schedule.take_slot(a);
    let from_b = schedule.take_slot(b);

    let repoint = |entries: Vec<Entry>, target: &SlotKey| -> Vec<Entry> {
        entries
            .into_iter()
            .map(|mut e| {
                e.employee = target.employee.clone();
                e.exchange_origin = true;
                e
            })
            .collect()
    };

    let to_a = repoint(from_b, a);
    let to_b = repoint(from_a, b);
    schedule.put_slot(a.clone(), to_a);
    schedule.put_slot(b.clone(), to_b);

    tracing::info!(date = %a.date, "same-day exchange resolved");
}

/// Hand the petitioner's real shifts to the acceptor and leave placeholders
/// behind.
///
/// Clones go to the acceptor re-identified, re-dated and with their note
/// cleared; the petitioner's originals keep their identity and note but are
/// rewritten to the transfer placeholder type. Entries that already are
/// placeholders neither move nor change; if nothing else is there, the
/// transfer is rejected and the schedule left unmodified.
fn transfer_cross_day(
    schedule: &mut Schedule,
    petitioner: &SlotKey,
    acceptor: &SlotKey,
) -> Result<usize, SwapError> {
    let movable = schedule
        .entries(petitioner)
        .iter()
        .filter(|e| !e.is_transfer_placeholder())
        .count();
    if movable == 0 {
        return Err(SwapError::NothingToTransfer);
    }

    let pet_entries = schedule.take_slot(petitioner);
    let mut acc_entries = schedule.take_slot(acceptor);

    for entry in pet_entries.iter().filter(|e| !e.is_transfer_placeholder()) {
        let mut clone = entry.clone();
        clone.id = EntryId::random();
        clone.date = acceptor.date;
        clone.employee = acceptor.employee.clone();
        clone.note = None;
        clone.swap_origin = true;
        acc_entries.push(clone);
    }

    let placeholders: Vec<Entry> = pet_entries
        .into_iter()
        .map(|mut e| {
            if !e.is_transfer_placeholder() {
                e.shift_type = ShiftTypeId::new(TRANSFER_PLACEHOLDER_ID);
                e.swap_origin = true;
            }
            e
        })
        .collect();

    schedule.put_slot(petitioner.clone(), placeholders);
    schedule.put_slot(acceptor.clone(), acc_entries);

    tracing::info!(
        from = %petitioner.date,
        to = %acceptor.date,
        moved = movable,
        "cross-day transfer resolved"
    );
    Ok(movable)
}
