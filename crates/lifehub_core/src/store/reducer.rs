//! Pure reducer over [`AppState`].
//!
//! # Invariants
//! - `reduce` performs no I/O; persistence is returned as data.
//! - Add appends; Update replaces by id in place; Delete removes by id.
//! - Records are never validated or merged here.

use crate::model::entity::{Entity, Record};
use crate::model::ui::Theme;
use crate::store::action::{Action, RemoteWrite};
use crate::store::state::{AppState, Collections};

/// Outcome of one reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// Replacement snapshot.
    pub state: AppState,
    /// Persistence call to fire, for CRUD actions only.
    pub effect: Option<RemoteWrite>,
}

/// Applies `action` to `state`.
pub fn reduce(mut state: AppState, action: Action) -> Reduction {
    let effect = match action {
        Action::SetUser(user) => {
            state.user = user;
            None
        }
        Action::SetTheme(theme) => {
            state.current_theme = theme;
            None
        }
        Action::AddTheme(theme) => {
            upsert_theme(&mut state.available_themes, theme);
            None
        }
        Action::SetActiveModule(module_id) => {
            state.active_module = module_id;
            None
        }
        Action::ToggleSidebar => {
            state.sidebar_collapsed = !state.sidebar_collapsed;
            None
        }
        Action::ToggleModule(module_id) => {
            for module in state.modules.iter_mut().filter(|m| m.id == module_id) {
                module.enabled = !module.enabled;
            }
            None
        }
        Action::Add(record) => {
            state.collections.push_record(record.clone());
            Some(RemoteWrite::Insert(record))
        }
        Action::Update(record) => {
            replace(&mut state.collections, record.clone());
            Some(RemoteWrite::Update(record))
        }
        Action::Delete { kind, id } => {
            with_entity_type!(kind, T => remove::<T>(&mut state.collections, &id));
            Some(RemoteWrite::Delete { kind, id })
        }
        Action::LoadData(patch) => {
            patch.apply_to(&mut state);
            None
        }
    };

    Reduction { state, effect }
}

fn replace(collections: &mut Collections, record: Record) {
    with_record!(record, item => replace_entity(collections, item))
}

fn replace_entity<T: Entity>(collections: &mut Collections, item: T) {
    for slot in T::collection_mut(collections)
        .iter_mut()
        .filter(|slot| slot.id() == item.id())
    {
        *slot = item.clone();
    }
}

fn remove<T: Entity>(collections: &mut Collections, id: &str) {
    T::collection_mut(collections).retain(|item| item.id() != id);
}

fn upsert_theme(themes: &mut Vec<Theme>, theme: Theme) {
    match themes.iter_mut().find(|existing| existing.id == theme.id) {
        Some(existing) => *existing = theme,
        None => themes.push(theme),
    }
}
