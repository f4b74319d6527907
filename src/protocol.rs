// Snapshot types crossing the core -> presentation boundary.
//
// The presentation layer never reaches into live session state; it renders
// from these serializable views, which carry everything a list screen
// needs: entries, the active edit target, the pending error banner, and
// draft readiness.

use serde::{Deserialize, Serialize};

use crate::draft::roster::{EntryId, Roster, RosterError};

/// One rendered list row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub id: EntryId,
    pub name: String,
    /// Whether this row is in edit mode.
    pub editing: bool,
}

/// A rendered roster: rows plus the list-level banner state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub entries: Vec<EntrySnapshot>,
    /// Pending validation message for this list, if any.
    pub error: Option<String>,
    /// Maximum row count, when the list is bounded.
    pub capacity: Option<usize>,
}

impl RosterSnapshot {
    pub fn capture(roster: &Roster, error: Option<&RosterError>) -> Self {
        RosterSnapshot {
            entries: roster
                .entries()
                .iter()
                .map(|e| EntrySnapshot {
                    id: e.id,
                    name: e.name.clone(),
                    editing: roster.editing() == Some(e.id),
                })
                .collect(),
            error: error.map(|e| e.to_string()),
            capacity: roster.capacity(),
        }
    }
}

/// The complete view of a session at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub teams: RosterSnapshot,
    pub participants: RosterSnapshot,
    /// Whether both rosters meet their configured minimums.
    pub ready_for_draft: bool,
    /// Number of drafts archived so far.
    pub drafts_recorded: usize,
}
