//! Dirty-month tracking and minimal write planning.
//!
//! The store partitions persisted schedule data by calendar month. Every
//! mutation reports the dates it touched; at sync time the planner turns the
//! accumulated dirty set into the smallest batch of month writes that still
//! propagates deletions.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::model::Entry;
use crate::schedule::Schedule;

/// Calendar-month partition key, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Which month partitions changed since the last confirmed commit.
///
/// `All` is the cheap answer after bulk operations (clear, full reload) where
/// enumerating individual months is not worth it; it means "every month that
/// currently has data".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirtyMonths {
    Months(BTreeSet<MonthKey>),
    All,
}

impl Default for DirtyMonths {
    fn default() -> Self {
        Self::Months(BTreeSet::new())
    }
}

impl DirtyMonths {
    /// Record a touched date. No-op in all-dirty mode.
    pub fn mark(&mut self, date: NaiveDate) {
        if let Self::Months(months) = self {
            months.insert(MonthKey::from_date(date));
        }
    }

    pub fn mark_all(&mut self) {
        *self = Self::All;
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Months(m) if m.is_empty())
    }

    /// Reset after a confirmed commit. All-dirty mode returns to explicit
    /// tracking rather than staying armed.
    pub fn confirm_synced(&mut self) {
        *self = Self::default();
    }
}

/// One month partition to transmit. An empty `entries` list is meaningful:
/// the month had data before and must be cleared remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteUnit {
    pub month: MonthKey,
    pub entries: Vec<Entry>,
}

/// Output of [`plan_sync`]: the write units plus the months that currently
/// hold data (stored as metadata so loads know which chunks exist).
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    pub units: Vec<WriteUnit>,
    pub active_months: Vec<MonthKey>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Build the minimal write plan for the schedule's current dirty state.
///
/// Reading the dirty set does not clear it; callers invoke
/// [`Schedule::confirm_synced`] only after the store acknowledges the batch,
/// so a failed commit retries exactly the outstanding months.
pub fn plan_sync(schedule: &Schedule) -> SyncPlan {
    let mut by_month: BTreeMap<MonthKey, Vec<Entry>> = BTreeMap::new();
    for entry in schedule.all_entries() {
        by_month
            .entry(MonthKey::from_date(entry.date))
            .or_default()
            .push(entry.clone());
    }
    let active_months: Vec<MonthKey> = by_month.keys().copied().collect();

    let units: Vec<WriteUnit> = match schedule.dirty() {
        DirtyMonths::All => by_month
            .into_iter()
            .map(|(month, entries)| WriteUnit { month, entries })
            .collect(),
        DirtyMonths::Months(months) => months
            .iter()
            .map(|month| WriteUnit {
                month: *month,
                entries: by_month.get(month).cloned().unwrap_or_default(),
            })
            .collect(),
    };

    tracing::debug!(
        units = units.len(),
        active = active_months.len(),
        "planned sync batch"
    );

    SyncPlan {
        units,
        active_months,
    }
}
