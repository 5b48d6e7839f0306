#![forbid(unsafe_code)]
use chrono::NaiveDate;
use escala::{
    plan_sync, Catalog, ClearGuard, CommitMetadata, Confirmed, DirtyMonths, Employee, JsonCache,
    MonthKey, Schedule, ScheduleStore, ShiftTypeId, SlotKey,
};
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn catalog() -> Catalog {
    Catalog {
        employees: vec![
            Employee::new("PAIS", "CMDT", "PA"),
            Employee::new("PISCO", "SVISOR", "PI"),
        ],
        shifts: escala::default_shift_types(),
    }
}

#[test]
fn mutations_mark_their_months_dirty() {
    let catalog = catalog();
    let e1 = catalog.employees[0].id.clone();
    let mut schedule = Schedule::new();
    assert!(schedule.dirty().is_clean());

    schedule.add_entry(d(2024, 1, 15), e1.clone(), ShiftTypeId::new("09-17"), None);
    schedule.add_entry(d(2024, 3, 2), e1, ShiftTypeId::new("13-20"), None);

    match schedule.dirty() {
        DirtyMonths::Months(months) => {
            assert!(months.contains(&MonthKey::new(2024, 1)));
            assert!(months.contains(&MonthKey::new(2024, 3)));
            assert_eq!(months.len(), 2);
        }
        DirtyMonths::All => panic!("expected explicit tracking"),
    }
}

#[test]
fn planning_is_a_fixed_point_until_commit_confirms() {
    let catalog = catalog();
    let e1 = catalog.employees[0].id.clone();
    let mut schedule = Schedule::new();
    schedule.add_entry(d(2024, 5, 1), e1, ShiftTypeId::new("09-17"), None);

    let first = plan_sync(&schedule);
    let second = plan_sync(&schedule);
    assert_eq!(first.units, second.units);
    assert!(!schedule.dirty().is_clean());

    schedule.confirm_synced();
    assert!(schedule.dirty().is_clean());
    assert!(plan_sync(&schedule).is_empty());
}

#[test]
fn emptied_months_produce_empty_write_units() {
    let catalog = catalog();
    let e1 = catalog.employees[0].id.clone();
    let mut schedule = Schedule::new();

    let entry = schedule.add_entry(d(2024, 6, 10), e1.clone(), ShiftTypeId::new("trib"), None);
    schedule.confirm_synced();

    // deleting the month's only entry must still transmit the month, as an
    // empty chunk, so the deletion reaches the store
    let key = SlotKey::new(d(2024, 6, 10), e1);
    schedule.remove_entry(&key, &entry.id);

    let plan = plan_sync(&schedule);
    assert_eq!(plan.units.len(), 1);
    assert_eq!(plan.units[0].month, MonthKey::new(2024, 6));
    assert!(plan.units[0].entries.is_empty());
    assert!(plan.active_months.is_empty());
}

#[test]
fn untouched_months_are_omitted_from_the_plan() {
    let catalog = catalog();
    let e1 = catalog.employees[0].id.clone();
    let mut schedule = Schedule::new();

    schedule.add_entry(d(2024, 7, 1), e1.clone(), ShiftTypeId::new("09-17"), None);
    schedule.add_entry(d(2024, 8, 1), e1.clone(), ShiftTypeId::new("09-17"), None);
    schedule.confirm_synced();

    schedule.add_entry(d(2024, 8, 2), e1, ShiftTypeId::new("13-20"), None);

    let plan = plan_sync(&schedule);
    assert_eq!(plan.units.len(), 1);
    assert_eq!(plan.units[0].month, MonthKey::new(2024, 8));
    assert_eq!(plan.units[0].entries.len(), 2);
    // both months still count as active metadata
    assert_eq!(plan.active_months.len(), 2);
}

#[test]
fn clear_switches_to_all_dirty_and_confirm_rearms_tracking() {
    let catalog = catalog();
    let e1 = catalog.employees[0].id.clone();
    let mut schedule = Schedule::new();
    schedule.add_entry(d(2024, 9, 1), e1.clone(), ShiftTypeId::new("09-17"), None);

    let guard = ClearGuard::new("segredo");
    let token = guard.unlock("segredo").unwrap();
    schedule.clear_all(token, Confirmed::acknowledge());
    assert_eq!(schedule.dirty(), &DirtyMonths::All);

    // in all-dirty mode individual marks are no-ops
    schedule.add_entry(d(2024, 10, 1), e1, ShiftTypeId::new("09-17"), None);
    assert_eq!(schedule.dirty(), &DirtyMonths::All);

    // all-dirty plans cover exactly the months that currently hold data
    let plan = plan_sync(&schedule);
    assert_eq!(plan.units.len(), 1);
    assert_eq!(plan.units[0].month, MonthKey::new(2024, 10));

    // a confirmed commit resets to explicit tracking, not back to all-dirty
    schedule.confirm_synced();
    assert!(schedule.dirty().is_clean());
    assert!(matches!(schedule.dirty(), DirtyMonths::Months(_)));
}

#[test]
fn json_cache_roundtrip() {
    let dir = tempdir().unwrap();
    let cache = JsonCache::open(dir.path().join("escala.json"));

    // empty cache loads as "nothing stored"
    let empty = cache.load_all().unwrap();
    assert!(empty.employees.is_none());
    assert!(empty.entries.is_none());

    let catalog = catalog();
    let e1 = catalog.employees[0].id.clone();
    let mut schedule = Schedule::new();
    schedule.add_entry(
        d(2024, 11, 5),
        e1.clone(),
        ShiftTypeId::new("09-17"),
        Some("Tribunal".into()),
    );
    schedule.add_entry(d(2024, 12, 1), e1.clone(), ShiftTypeId::new("folga"), None);

    let plan = plan_sync(&schedule);
    cache
        .commit(&plan, &CommitMetadata::new(catalog.clone(), &plan))
        .unwrap();
    schedule.confirm_synced();

    let loaded = cache.load_all().unwrap();
    assert_eq!(loaded.employees.unwrap().len(), 2);
    assert_eq!(loaded.shifts.unwrap().len(), catalog.shifts.len());
    let entries = loaded.entries.unwrap();
    assert_eq!(entries.len(), 2);
    let reloaded = Schedule::from_entries(entries);
    assert!(reloaded.dirty().is_clean());
    let key = SlotKey::new(d(2024, 11, 5), e1);
    assert_eq!(reloaded.entries(&key)[0].note.as_deref(), Some("Tribunal"));
}

#[test]
fn json_cache_partial_commit_and_chunk_deletion() {
    let dir = tempdir().unwrap();
    let cache = JsonCache::open(dir.path().join("escala.json"));
    let catalog = catalog();
    let e1 = catalog.employees[0].id.clone();

    let mut schedule = Schedule::new();
    let nov = schedule.add_entry(d(2024, 11, 5), e1.clone(), ShiftTypeId::new("09-17"), None);
    schedule.add_entry(d(2024, 12, 1), e1.clone(), ShiftTypeId::new("folga"), None);

    let plan = plan_sync(&schedule);
    cache
        .commit(&plan, &CommitMetadata::new(catalog.clone(), &plan))
        .unwrap();
    schedule.confirm_synced();

    // drop November's only entry; the next plan covers only November, with an
    // empty unit that must delete the stored chunk
    let key = SlotKey::new(d(2024, 11, 5), e1);
    schedule.remove_entry(&key, &nov.id);
    let plan = plan_sync(&schedule);
    assert_eq!(plan.units.len(), 1);
    cache
        .commit(&plan, &CommitMetadata::new(catalog, &plan))
        .unwrap();
    schedule.confirm_synced();

    // December survived untouched, November is gone
    let loaded = cache.load_all().unwrap();
    let entries = loaded.entries.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, d(2024, 12, 1));
}
