//! Substring search over tasks, projects, notes and events.

use crate::model::entity::{EntityKind, RecordId};
use crate::store::state::Collections;

/// Queries must be longer than this many characters.
pub const MIN_QUERY_CHARS: usize = 2;

const SEARCHABLE_KINDS: [EntityKind; 4] = [
    EntityKind::Task,
    EntityKind::Project,
    EntityKind::Note,
    EntityKind::Event,
];

#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    /// Restrict hits to one kind.
    pub kind: Option<EntityKind>,
    /// Maximum number of hits; `None` returns all.
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
            limit: None,
        }
    }
}

/// One matching record, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub kind: EntityKind,
    pub id: RecordId,
    /// Title, or name for projects.
    pub label: String,
}

/// Every hit for `term` across the searchable kinds.
pub fn search_all(collections: &Collections, term: &str) -> Vec<SearchHit> {
    search(collections, &SearchQuery::new(term))
}

/// Hits in kind order (tasks, projects, notes, events), then stored order.
pub fn search(collections: &Collections, query: &SearchQuery) -> Vec<SearchHit> {
    if query.text.chars().count() <= MIN_QUERY_CHARS {
        return Vec::new();
    }
    let needle = query.text.to_lowercase();
    let matches = |field: &str| field.to_lowercase().contains(&needle);
    let matches_opt = |field: &Option<String>| field.as_deref().is_some_and(matches);

    let mut hits = Vec::new();
    for kind in SEARCHABLE_KINDS {
        if query.kind.is_some_and(|wanted| wanted != kind) {
            continue;
        }
        match kind {
            EntityKind::Task => hits.extend(
                collections
                    .tasks
                    .iter()
                    .filter(|task| matches(&task.title) || matches_opt(&task.description))
                    .map(|task| hit(kind, &task.id, &task.title)),
            ),
            EntityKind::Project => hits.extend(
                collections
                    .projects
                    .iter()
                    .filter(|project| {
                        matches(&project.name) || matches_opt(&project.description)
                    })
                    .map(|project| hit(kind, &project.id, &project.name)),
            ),
            EntityKind::Note => hits.extend(
                collections
                    .notes
                    .iter()
                    .filter(|note| matches(&note.title) || matches(&note.content))
                    .map(|note| hit(kind, &note.id, &note.title)),
            ),
            EntityKind::Event => hits.extend(
                collections
                    .events
                    .iter()
                    .filter(|event| matches(&event.title) || matches_opt(&event.description))
                    .map(|event| hit(kind, &event.id, &event.title)),
            ),
            _ => {}
        }
    }

    if let Some(limit) = query.limit {
        hits.truncate(limit);
    }
    hits
}

fn hit(kind: EntityKind, id: &str, label: &str) -> SearchHit {
    SearchHit {
        kind,
        id: id.to_string(),
        label: label.to_string(),
    }
}
