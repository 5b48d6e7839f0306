//! Pattern resolution and bulk schedule generation.
//!
//! A pattern is a raw comma-separated sequence such as `"09-17, 09-17, FOLGA"`
//! that cycles over a date range. Each segment resolves to either a shift
//! type or a hole (a day that intentionally produces nothing), through an
//! ordered rule list where the first match wins.

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::model::{Catalog, EmployeeId, Entry, ShiftType, ShiftTypeId};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty: expected comma-separated shift codes")]
    EmptyPattern,
    #[error("could not resolve pattern segment: \"{0}\"")]
    UnresolvedSegment(String),
    #[error("day count must be at least 1")]
    InvalidDayCount,
    #[error("at least one target employee is required")]
    NoTargetEmployees,
    #[error("date range overflows the calendar")]
    DateOverflow,
}

/// Resolution of one pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    /// Intentionally no assignment on this cycle position.
    Hole,
    Shift(ShiftTypeId),
}

/// A validated cyclic sequence of tokens, one per pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCycle(Vec<PatternToken>);

impl PatternCycle {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Token for a day offset, wrapping over the cycle.
    pub fn token_at(&self, offset: usize) -> &PatternToken {
        &self.0[offset % self.0.len()]
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.0
    }
}

/// Resolve a raw pattern against the shift-type catalog.
///
/// Per segment, case-insensitively unless noted, first match wins:
/// off keywords (`FOLGA`, `F`) → the canonical off-day type when one exists;
/// blank keywords (`OFF`, `EMPTY`, `X`) → hole; exact code; exact label;
/// exact id (case-sensitive); label substring. Anything left over is an
/// error naming the segment. Resolution is deterministic for a given catalog.
pub fn resolve_pattern(raw: &str, shifts: &[ShiftType]) -> Result<PatternCycle, PatternError> {
    let segments: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return Err(PatternError::EmptyPattern);
    }

    let off_day = shifts
        .iter()
        .find(|s| s.id.as_str() == crate::model::OFF_DAY_TYPE_ID || s.code.eq_ignore_ascii_case("FOLGA"));

    segments
        .into_iter()
        .map(|segment| resolve_segment(segment, shifts, off_day))
        .collect::<Result<Vec<_>, _>>()
        .map(PatternCycle)
}

fn resolve_segment(
    segment: &str,
    shifts: &[ShiftType],
    off_day: Option<&ShiftType>,
) -> Result<PatternToken, PatternError> {
    let upper = segment.to_uppercase();

    if let Some(off) = off_day {
        if upper == "FOLGA" || upper == "F" {
            return Ok(PatternToken::Shift(off.id.clone()));
        }
    }

    if upper == "OFF" || upper == "EMPTY" || upper == "X" {
        return Ok(PatternToken::Hole);
    }

    if let Some(s) = shifts.iter().find(|s| s.code.to_uppercase() == upper) {
        return Ok(PatternToken::Shift(s.id.clone()));
    }
    if let Some(s) = shifts.iter().find(|s| s.label.to_uppercase() == upper) {
        return Ok(PatternToken::Shift(s.id.clone()));
    }
    if let Some(s) = shifts.iter().find(|s| s.id.as_str() == segment) {
        return Ok(PatternToken::Shift(s.id.clone()));
    }
    if let Some(s) = shifts.iter().find(|s| s.label.to_uppercase().contains(&upper)) {
        return Ok(PatternToken::Shift(s.id.clone()));
    }

    Err(PatternError::UnresolvedSegment(segment.to_owned()))
}

/// Expand a pattern over `days` consecutive dates for every target employee.
///
/// A shift token emits one fresh entry per employee for that date; a hole
/// emits nothing — it never clears what already exists on that date. Feed the
/// result to [`crate::schedule::Schedule::apply_generated`], which overwrites
/// the cells that did receive entries and leaves hole days alone.
pub fn generate(
    raw: &str,
    start: NaiveDate,
    days: u32,
    targets: &[EmployeeId],
    catalog: &Catalog,
) -> Result<Vec<Entry>, PatternError> {
    if days == 0 {
        return Err(PatternError::InvalidDayCount);
    }
    let targets: Vec<&EmployeeId> = targets
        .iter()
        .filter(|id| catalog.find_employee(id).is_some())
        .collect();
    if targets.is_empty() {
        return Err(PatternError::NoTargetEmployees);
    }

    let cycle = resolve_pattern(raw, &catalog.shifts)?;

    let mut out = Vec::new();
    for offset in 0..days {
        let date = start
            .checked_add_signed(Duration::days(i64::from(offset)))
            .ok_or(PatternError::DateOverflow)?;
        if let PatternToken::Shift(shift_type) = cycle.token_at(offset as usize) {
            for employee in &targets {
                out.push(Entry::new(date, (*employee).clone(), shift_type.clone()));
            }
        }
    }

    tracing::debug!(
        days,
        employees = targets.len(),
        entries = out.len(),
        "generated pattern schedule"
    );
    Ok(out)
}

/// Inclusive day count of a `[start, end]` range, if valid.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Result<u32, PatternError> {
    let days = end.signed_duration_since(start).num_days() + 1;
    u32::try_from(days).map_err(|_| PatternError::InvalidDayCount)
}
