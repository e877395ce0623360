//! Action catalog and the persistence effects actions produce.

use crate::model::entity::{EntityKind, Record, RecordId};
use crate::model::ui::{Theme, User};
use crate::store::state::StatePatch;

/// Every mutation the store accepts.
///
/// Entity CRUD is expressed once, generically over [`Record`], instead of
/// one variant per kind and verb.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetUser(Option<User>),
    SetTheme(Theme),
    /// Registers a custom theme, replacing any theme with the same id.
    AddTheme(Theme),
    SetActiveModule(String),
    ToggleSidebar,
    /// Flips `enabled` on the module with this id.
    ToggleModule(String),
    Add(Record),
    Update(Record),
    Delete { kind: EntityKind, id: RecordId },
    LoadData(StatePatch),
}

impl Action {
    pub fn delete(kind: EntityKind, id: impl Into<RecordId>) -> Self {
        Self::Delete {
            kind,
            id: id.into(),
        }
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetUser(_) => "set_user",
            Self::SetTheme(_) => "set_theme",
            Self::AddTheme(_) => "add_theme",
            Self::SetActiveModule(_) => "set_active_module",
            Self::ToggleSidebar => "toggle_sidebar",
            Self::ToggleModule(_) => "toggle_module",
            Self::Add(_) => "add",
            Self::Update(_) => "update",
            Self::Delete { .. } => "delete",
            Self::LoadData(_) => "load_data",
        }
    }

    /// Entity kind targeted by CRUD actions.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Add(record) | Self::Update(record) => Some(record.kind()),
            Self::Delete { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// A persistence call mirrored from a CRUD action.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteWrite {
    Insert(Record),
    Update(Record),
    Delete { kind: EntityKind, id: RecordId },
}

impl RemoteWrite {
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete { .. } => "delete",
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Insert(record) | Self::Update(record) => record.kind(),
            Self::Delete { kind, .. } => *kind,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Insert(record) | Self::Update(record) => record.id(),
            Self::Delete { id, .. } => id.as_str(),
        }
    }
}
