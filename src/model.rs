use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Employee
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membre de l'équipe apparaissant sur la grille.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub initials: String,
}

impl Employee {
    pub fn new<N: Into<String>, R: Into<String>, I: Into<String>>(
        name: N,
        role: R,
        initials: I,
    ) -> Self {
        Self {
            id: EmployeeId::random(),
            name: name.into(),
            role: role.into(),
            initials: initials.into(),
        }
    }
}

/// Identifiant fort pour ShiftType
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShiftTypeId(String);

impl ShiftTypeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Canonical weekly off-day type ("Folga Semanal").
pub const OFF_DAY_TYPE_ID: &str = "folga";
/// Fixed placeholder type a transfer leaves behind ("Folga por Troca").
pub const TRANSFER_PLACEHOLDER_ID: &str = "folga_troca";

/// Kind of shift an entry can reference. Identities are stable: entries keep
/// pointing at a type after it is edited or removed, and renderers fall back
/// when the reference no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftType {
    pub id: ShiftTypeId,
    pub code: String,
    pub label: String,
    pub color: String,
    pub text_color: String,
    pub is_off_day: bool,
}

impl ShiftType {
    pub fn new<C: Into<String>, L: Into<String>>(code: C, label: L, is_off_day: bool) -> Self {
        Self {
            id: ShiftTypeId::random(),
            code: code.into(),
            label: label.into(),
            color: "#ffffff".to_owned(),
            text_color: "#1e293b".to_owned(),
            is_off_day,
        }
    }
}

/// Identifiant fort pour Entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// One schedule entry: employee + date + shift type, optionally annotated
/// with a free-text note (diligência).
///
/// Field names on the wire match the store documents (`dateStr`,
/// `employeeId`, ...), so loaded data round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    #[serde(rename = "dateStr")]
    pub date: NaiveDate,
    #[serde(rename = "employeeId")]
    pub employee: EmployeeId,
    #[serde(rename = "shiftTypeId")]
    pub shift_type: ShiftTypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Advisory only: pattern generation does not honour it yet.
    #[serde(rename = "isLocked", default, skip_serializing_if = "is_false")]
    pub locked: bool,
    /// Set on entries produced by a cross-day transfer.
    #[serde(rename = "isSwap", default, skip_serializing_if = "is_false")]
    pub swap_origin: bool,
    /// Set on entries produced by a same-day exchange.
    #[serde(rename = "isExchange", default, skip_serializing_if = "is_false")]
    pub exchange_origin: bool,
}

impl Entry {
    pub fn new(date: NaiveDate, employee: EmployeeId, shift_type: ShiftTypeId) -> Self {
        Self {
            id: EntryId::random(),
            date,
            employee,
            shift_type,
            note: None,
            locked: false,
            swap_origin: false,
            exchange_origin: false,
        }
    }

    pub fn is_transfer_placeholder(&self) -> bool {
        self.shift_type.as_str() == TRANSFER_PLACEHOLDER_ID
    }
}

/// Employees and shift types known to the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub employees: Vec<Employee>,
    pub shifts: Vec<ShiftType>,
}

impl Catalog {
    pub fn find_employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    pub fn find_shift(&self, id: &ShiftTypeId) -> Option<&ShiftType> {
        self.shifts.iter().find(|s| &s.id == id)
    }

    /// Display name for an employee reference, tolerating orphans left behind
    /// by a deletion.
    pub fn employee_name<'a>(&'a self, id: &EmployeeId) -> &'a str {
        self.find_employee(id).map_or("unknown", |e| e.name.as_str())
    }

    /// Display code for a shift-type reference, tolerating removed types.
    pub fn shift_code<'a>(&'a self, id: &ShiftTypeId) -> &'a str {
        self.find_shift(id).map_or("?", |s| s.code.as_str())
    }

    /// The type `FOLGA`/`F` pattern tokens resolve to, if the catalog has one.
    pub fn canonical_off_day(&self) -> Option<&ShiftType> {
        self.shifts
            .iter()
            .find(|s| s.id.as_str() == OFF_DAY_TYPE_ID || s.code.eq_ignore_ascii_case("FOLGA"))
    }

    /// Insert-or-replace keyed by id.
    pub fn upsert_employee(&mut self, employee: Employee) {
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(slot) => *slot = employee,
            None => self.employees.push(employee),
        }
    }

    /// Removal never cascades into the schedule; entries referencing the
    /// employee become orphans.
    pub fn remove_employee(&mut self, id: &EmployeeId) {
        self.employees.retain(|e| &e.id != id);
    }

    pub fn upsert_shift(&mut self, shift: ShiftType) {
        match self.shifts.iter_mut().find(|s| s.id == shift.id) {
            Some(slot) => *slot = shift,
            None => self.shifts.push(shift),
        }
    }

    pub fn remove_shift(&mut self, id: &ShiftTypeId) {
        self.shifts.retain(|s| &s.id != id);
    }

    /// Merge any default type the catalog lacks. Loaded data may predate the
    /// transfer placeholder; swaps rely on it existing.
    pub fn ensure_default_shifts(&mut self) {
        for def in default_shift_types() {
            if self.find_shift(&def.id).is_none() {
                self.shifts.push(def);
            }
        }
    }
}

fn preset(
    id: &str,
    code: &str,
    label: &str,
    color: &str,
    text_color: &str,
    is_off_day: bool,
) -> ShiftType {
    ShiftType {
        id: ShiftTypeId::new(id),
        code: code.to_owned(),
        label: label.to_owned(),
        color: color.to_owned(),
        text_color: text_color.to_owned(),
        is_off_day,
    }
}

/// Shift types every fresh session starts from. Ids are load-bearing:
/// historical entries reference them, so they are never regenerated.
pub fn default_shift_types() -> Vec<ShiftType> {
    vec![
        preset("folga", "FOLGA", "Folga Semanal", "#fde047", "#000000", true),
        preset("00-0815", "00:00-08:15", "Noite", "#ffffff", "#1e293b", false),
        preset("0800-1600", "08:00-16:00", "Dia", "#ffffff", "#1e293b", false),
        preset("09-17", "09:00-17:00", "Dia", "#ffffff", "#1e293b", false),
        preset("13-20", "13:00-20:00", "Tarde", "#ffffff", "#1e293b", false),
        preset("16-00", "16:00-00:00", "Tarde/Noite", "#ffffff", "#1e293b", false),
        preset("acidentes", "ACIDENTES", "Piquete Acidentes", "#ef4444", "#ffffff", false),
        preset("radar", "RADAR", "Fiscalização Radar", "#fb923c", "#000000", false),
        preset("trib", "TRIB", "Tribunal", "#d8b4fe", "#000000", false),
        preset("exc", "EXC", "Excecional", "#60a5fa", "#ffffff", false),
        preset("folga_troca", "FOLGA P/T", "Folga por Troca", "#9ca3af", "#ffffff", true),
    ]
}
