#![forbid(unsafe_code)]
//! Escala — core de escalas de serviço (shift rosters).
//!
//! - Assignment store keyed by `(date, employee)` with a strict
//!   non-empty-sequence invariant.
//! - Pattern resolver + generator for bulk schedule creation.
//! - Two-pick swap engine: same-day exchange (permuta) and cross-day
//!   transfer with "Folga por Troca" placeholders.
//! - Dirty-month tracking and minimal sync planning against a chunked
//!   document store, with a local JSON fallback.
//!
//! Rendering, auth and transports live outside; this crate is the in-memory
//! model and its mutation engine only. Dates are naive ISO days, no times.

pub mod audit;
pub mod guard;
pub mod model;
pub mod pattern;
pub mod schedule;
pub mod storage;
pub mod swap;
pub mod sync;

pub use audit::{AuditAction, AuditRecord, AuditSink, LogSink, MemorySink};
pub use guard::{ClearGuard, ClearToken, Confirmed, GuardError};
pub use model::{
    default_shift_types, Catalog, Employee, EmployeeId, Entry, EntryId, ShiftType, ShiftTypeId,
    OFF_DAY_TYPE_ID, TRANSFER_PLACEHOLDER_ID,
};
pub use pattern::{
    days_in_range, generate, resolve_pattern, PatternCycle, PatternError, PatternToken,
};
pub use schedule::{DaySnapshot, Schedule, SlotKey};
pub use storage::{CommitMetadata, JsonCache, LoadedData, ScheduleStore};
pub use swap::{Petitioner, SwapError, SwapOutcome, SwapSession, SwapState};
pub use sync::{plan_sync, DirtyMonths, MonthKey, SyncPlan, WriteUnit};
