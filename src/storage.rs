//! External-store contracts and the local JSON fallback cache.
//!
//! The remote document store is consumed through [`ScheduleStore`]: loads
//! return all-optional collections (absent means "keep what you have"), and
//! commits take exactly the sync planner's output so unchanged months are
//! never retransmitted. [`JsonCache`] implements the same contract against a
//! single local file for sessions without a configured remote.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::{Catalog, Employee, Entry, ShiftType};
use crate::sync::{MonthKey, SyncPlan};

/// What a load produced. `None` fields mean the store had nothing for that
/// collection and existing in-memory state should be kept.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub employees: Option<Vec<Employee>>,
    pub shifts: Option<Vec<ShiftType>>,
    pub entries: Option<Vec<Entry>>,
}

/// Metadata accompanying every commit: the catalog collections, which months
/// hold data, and a last-updated stamp.
#[derive(Debug, Clone)]
pub struct CommitMetadata {
    pub catalog: Catalog,
    pub active_months: Vec<MonthKey>,
    pub last_updated: DateTime<Utc>,
}

impl CommitMetadata {
    pub fn new(catalog: Catalog, plan: &SyncPlan) -> Self {
        Self {
            catalog,
            active_months: plan.active_months.clone(),
            last_updated: Utc::now(),
        }
    }
}

/// Abstract persistent store. A failed commit leaves the caller's dirty
/// tracker untouched, so the next attempt retries the same months.
pub trait ScheduleStore {
    fn load_all(&self) -> anyhow::Result<LoadedData>;
    fn commit(&self, plan: &SyncPlan, meta: &CommitMetadata) -> anyhow::Result<()>;
}

/// On-disk document shape, mirroring the remote store's: camelCase fields,
/// schedule entries chunked per `YYYY-MM` month key.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    employees: Option<Vec<Employee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shifts: Option<Vec<ShiftType>>,
    #[serde(default)]
    active_months: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    schedule_by_month: BTreeMap<String, Vec<Entry>>,
}

/// Single-file JSON cache with atomic writes.
pub struct JsonCache {
    path: PathBuf,
}

impl JsonCache {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_doc(&self) -> anyhow::Result<CacheDoc> {
        if !self.path.exists() {
            return Ok(CacheDoc::default());
        }
        let data = fs::read(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))
    }

    fn write_doc(&self, doc: &CacheDoc) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(doc)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl ScheduleStore for JsonCache {
    fn load_all(&self) -> anyhow::Result<LoadedData> {
        let doc = self.read_doc()?;
        let entries: Vec<Entry> = doc
            .schedule_by_month
            .into_values()
            .flatten()
            .collect();
        Ok(LoadedData {
            employees: doc.employees,
            shifts: doc.shifts,
            entries: if entries.is_empty() {
                None
            } else {
                Some(entries)
            },
        })
    }

    /// Rewrite only the months in the plan; a unit with no entries removes
    /// its chunk so deletions propagate. Months outside the plan stay as
    /// they are.
    fn commit(&self, plan: &SyncPlan, meta: &CommitMetadata) -> anyhow::Result<()> {
        let mut doc = self.read_doc()?;
        doc.employees = Some(meta.catalog.employees.clone());
        doc.shifts = Some(meta.catalog.shifts.clone());
        doc.active_months = meta.active_months.iter().map(MonthKey::to_string).collect();
        doc.last_updated = Some(meta.last_updated);

        for unit in &plan.units {
            let key = unit.month.to_string();
            if unit.entries.is_empty() {
                doc.schedule_by_month.remove(&key);
            } else {
                doc.schedule_by_month.insert(key, unit.entries.clone());
            }
        }

        self.write_doc(&doc)?;
        tracing::debug!(chunks = plan.units.len(), path = %self.path.display(), "cache commit");
        Ok(())
    }
}
