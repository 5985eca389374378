use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UnitState
// ---------------------------------------------------------------------------

/// Inspection/signature status of a unit.
///
/// `as_str` is the label persisted in the store and written to the CSV
/// export; `name` is the kebab-case form used on the command line and in
/// JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitState {
    #[default]
    NoContact,
    Dampness,
    Signed,
    NoDampness,
    RefusedToSign,
    Vacant,
}

impl UnitState {
    pub const ALL: [UnitState; 6] = [
        Self::NoContact,
        Self::Dampness,
        Self::Signed,
        Self::NoDampness,
        Self::RefusedToSign,
        Self::Vacant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoContact => "sin contacto",
            Self::Dampness => "humedad",
            Self::Signed => "firmó",
            Self::NoDampness => "sin humedad",
            Self::RefusedToSign => "no quiere firmar",
            Self::Vacant => "desocupado",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NoContact => "no-contact",
            Self::Dampness => "dampness",
            Self::Signed => "signed",
            Self::NoDampness => "no-dampness",
            Self::RefusedToSign => "refused-to-sign",
            Self::Vacant => "vacant",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoContact => "No contact",
            Self::Dampness => "Dampness",
            Self::Signed => "Signed",
            Self::NoDampness => "No dampness",
            Self::RefusedToSign => "Refused to sign",
            Self::Vacant => "Vacant",
        }
    }

    /// Accepts the persisted label or the kebab-case name, ignoring case and
    /// surrounding whitespace.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s || state.name() == s)
    }

    /// Load-time coercion: anything unrecognized becomes the default.
    pub fn from_str_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }
}

impl std::fmt::Display for UnitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OccupantType
// ---------------------------------------------------------------------------

/// Whether the occupant owns or rents the unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccupantType {
    #[default]
    Unspecified,
    Owner,
    Tenant,
}

impl OccupantType {
    pub const ALL: [OccupantType; 3] = [Self::Unspecified, Self::Owner, Self::Tenant];

    /// Persisted label. Unspecified is stored as an empty cell.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Owner => "dueño",
            Self::Tenant => "inquilino",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Owner => "owner",
            Self::Tenant => "tenant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.name() == s)
    }

    pub fn from_str_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }
}

impl std::fmt::Display for OccupantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UnitRecord
// ---------------------------------------------------------------------------

/// One physical apartment. `unit_id` (`"{tower}-{number}"`) is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub tower: String,
    pub floor: i64,
    /// `floor * 100 + sequence`.
    pub number: i64,
    pub unit_id: String,

    // --- mutable fields ---
    pub state: UnitState,
    #[serde(default)]
    pub occupant_name: String,
    #[serde(default)]
    pub occupant_type: OccupantType,
    #[serde(default)]
    pub notes: String,
}

impl UnitRecord {
    /// A fresh record with default state and empty fields.
    pub fn new(tower: &str, floor: i64, number: i64) -> Self {
        Self {
            tower: tower.to_string(),
            floor,
            number,
            unit_id: unit_id(tower, number),
            state: UnitState::default(),
            occupant_name: String::new(),
            occupant_type: OccupantType::default(),
            notes: String::new(),
        }
    }
}

/// Compose the primary key for a tower and unit number.
pub fn unit_id(tower: &str, number: i64) -> String {
    format!("{}-{}", tower, number)
}

// ---------------------------------------------------------------------------
// UnitEdit
// ---------------------------------------------------------------------------

/// New values for the four mutable fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitEdit {
    pub state: UnitState,
    pub occupant_name: String,
    pub occupant_type: OccupantType,
    pub notes: String,
}

impl UnitEdit {
    /// Start from a record's current values.
    pub fn from_record(record: &UnitRecord) -> Self {
        Self {
            state: record.state,
            occupant_name: record.occupant_name.clone(),
            occupant_type: record.occupant_type,
            notes: record.notes.clone(),
        }
    }

    /// Overwrite the mutable fields; identity fields are left alone.
    pub fn apply_to(&self, record: &mut UnitRecord) {
        record.state = self.state;
        record.occupant_name = self.occupant_name.clone();
        record.occupant_type = self.occupant_type;
        record.notes = self.notes.clone();
    }
}
