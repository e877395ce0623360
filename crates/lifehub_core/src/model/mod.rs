//! Domain records for every productivity module.
//!
//! # Responsibility
//! - Define the flat, serde-serializable record for each entity kind.
//! - Keep wire field names compatible with exported JSON backups (camelCase).
//!
//! # Invariants
//! - Every record carries an opaque `id` assigned at creation.
//! - Records are replaced whole on update; no field-level patching lives here.

/// Implements [`entity::Entity`] for a record struct.
///
/// Arguments: struct, `Record`/`EntityKind` variant, `Collections` field,
/// and the timestamp field the kind is ordered by.
macro_rules! impl_entity {
    ($ty:ty, $variant:ident, $field:ident, $order:ident) => {
        impl $crate::model::entity::Entity for $ty {
            const KIND: $crate::model::entity::EntityKind =
                $crate::model::entity::EntityKind::$variant;

            fn id(&self) -> &str {
                self.id.as_str()
            }

            fn order_timestamp(&self) -> chrono::DateTime<chrono::Utc> {
                self.$order
            }

            fn collection(collections: &$crate::store::state::Collections) -> &Vec<Self> {
                &collections.$field
            }

            fn collection_mut(
                collections: &mut $crate::store::state::Collections,
            ) -> &mut Vec<Self> {
                &mut collections.$field
            }

            fn into_record(self) -> $crate::model::entity::Record {
                $crate::model::entity::Record::$variant(self)
            }
        }
    };
}

pub mod academic;
pub mod book;
pub mod entity;
pub mod event;
pub mod faith;
pub mod finance;
pub mod goal;
pub mod journal;
pub mod note;
pub mod pomodoro;
pub mod project;
pub mod task;
pub mod ui;
