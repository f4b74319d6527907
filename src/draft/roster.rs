// Roster state: named entries, edit tracking, and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A failed roster mutation. Every variant is recoverable: the roster is
/// left exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("name must be unique: `{name}` is already taken")]
    DuplicateName { name: String },

    #[error("roster is full (limit {max})")]
    CapacityExceeded { max: usize },

    #[error("no entry with id {id}")]
    UnknownEntry { id: EntryId },
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Opaque stable identifier for a roster entry.
///
/// Ids are allocated from a per-roster counter and never reused, so a
/// caller can hold one across deletions without it silently coming to
/// refer to a different entry than the one the user selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single named entry on a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: EntryId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// An ordered list of uniquely-named entries with at most one entry in
/// edit mode at a time.
///
/// Insertion order is significant: it is both the display order and the
/// bucket order the assignment engine distributes into. Names are unique
/// under case-insensitive comparison and never empty after trimming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    /// The entry currently being edited, if any.
    editing: Option<EntryId>,
    /// Maximum number of entries, when bounded.
    capacity: Option<usize>,
    next_id: u64,
}

impl Roster {
    /// Create an empty, unbounded roster.
    pub fn new() -> Self {
        Roster {
            entries: Vec::new(),
            editing: None,
            capacity: None,
            next_id: 0,
        }
    }

    /// Create an empty roster that refuses to grow beyond `max` entries.
    pub fn with_capacity(max: usize) -> Self {
        Roster {
            capacity: Some(max),
            ..Roster::new()
        }
    }

    /// Validate and append a new entry, returning its id.
    ///
    /// The name is trimmed before validation. Fails with `CapacityExceeded`
    /// when the roster is bounded and full, `EmptyName` when the trimmed
    /// name has zero length, and `DuplicateName` on a case-insensitive
    /// collision with an existing entry.
    pub fn add(&mut self, name: &str) -> Result<EntryId, RosterError> {
        if let Some(max) = self.capacity {
            if self.entries.len() >= max {
                return Err(RosterError::CapacityExceeded { max });
            }
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.collides(trimmed, None) {
            return Err(RosterError::DuplicateName {
                name: trimmed.to_string(),
            });
        }

        let id = self.alloc_id();
        self.entries.push(RosterEntry {
            id,
            name: trimmed.to_string(),
        });
        Ok(id)
    }

    /// Mark an entry as the current edit target.
    ///
    /// Beginning an edit while another entry is already in edit mode
    /// silently replaces the previous target; there is no implicit save.
    pub fn begin_edit(&mut self, id: EntryId) -> Result<(), RosterError> {
        if !self.contains(id) {
            return Err(RosterError::UnknownEntry { id });
        }
        self.editing = Some(id);
        Ok(())
    }

    /// Leave edit mode without changing any entry.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Rename an entry, clearing the edit target on success.
    ///
    /// Validation matches `add`, except the entry being renamed is excluded
    /// from the uniqueness check, so committing its own current name (or a
    /// case variant of it) succeeds. Committing does not require the entry
    /// to be the active edit target.
    pub fn commit_edit(&mut self, id: EntryId, new_name: &str) -> Result<(), RosterError> {
        if !self.contains(id) {
            return Err(RosterError::UnknownEntry { id });
        }
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.collides(trimmed, Some(id)) {
            return Err(RosterError::DuplicateName {
                name: trimmed.to_string(),
            });
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.name = trimmed.to_string();
        }
        self.editing = None;
        Ok(())
    }

    /// Remove an entry, preserving the relative order of the rest.
    ///
    /// If the removed entry was the edit target, edit mode is cleared; an
    /// edit target on any other entry keeps referring to that entry.
    pub fn remove(&mut self, id: EntryId) -> Result<(), RosterError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(RosterError::UnknownEntry { id })?;
        self.entries.remove(idx);
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(())
    }

    /// Whether the roster has enough entries to take part in a draft.
    pub fn is_ready(&self, minimum: usize) -> bool {
        self.entries.len() >= minimum
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Look up an entry by id.
    pub fn get(&self, id: EntryId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The current edit target, if any.
    pub fn editing(&self) -> Option<EntryId> {
        self.editing
    }

    /// The maximum entry count, when bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Case-insensitive collision check. Uses Unicode lowercasing rather
    /// than ASCII-only comparison so `Ärzte` and `ärzte` collide.
    fn collides(&self, candidate: &str, exclude: Option<EntryId>) -> bool {
        let lowered = candidate.to_lowercase();
        self.entries
            .iter()
            .any(|e| Some(e.id) != exclude && e.name.to_lowercase() == lowered)
    }

    fn alloc_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
