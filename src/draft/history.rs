// Append-only archive of completed drafts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::Assignment;

/// One archived draft. `number` is 1-based and used directly for display
/// ("Draft #1", "Draft #2", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRecord {
    pub number: usize,
    pub recorded_at: DateTime<Utc>,
    pub assignment: Assignment,
}

/// The session's draft archive.
///
/// Records are appended in the order drafts complete and are never removed
/// or mutated afterwards; the archive only empties on a full session reset.
/// Each record holds its own copy of the assignment, so nothing the caller
/// does with the original after recording can reach into the archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftHistory {
    records: Vec<DraftRecord>,
}

impl DraftHistory {
    pub fn new() -> Self {
        DraftHistory::default()
    }

    /// Archive a completed draft and return the stored record.
    pub fn record(&mut self, assignment: &Assignment) -> &DraftRecord {
        let idx = self.records.len();
        self.records.push(DraftRecord {
            number: idx + 1,
            recorded_at: Utc::now(),
            assignment: assignment.clone(),
        });
        &self.records[idx]
    }

    /// All records in recording order.
    pub fn all(&self) -> &[DraftRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&DraftRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record. Only the session reset path calls this.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::engine::TeamAssignment;

    fn sample_assignment() -> Assignment {
        Assignment {
            teams: vec![
                TeamAssignment {
                    team: "A".to_string(),
                    picks: vec!["p1".to_string(), "p3".to_string()],
                },
                TeamAssignment {
                    team: "B".to_string(),
                    picks: vec!["p2".to_string()],
                },
            ],
        }
    }

    #[test]
    fn records_are_numbered_from_one_in_call_order() {
        let mut history = DraftHistory::new();
        let first = sample_assignment();
        let mut second = sample_assignment();
        second.teams[0].picks.reverse();

        history.record(&first);
        history.record(&second);

        assert_eq!(history.len(), 2);
        assert_eq!(history.all()[0].number, 1);
        assert_eq!(history.all()[1].number, 2);
        assert_eq!(history.all()[0].assignment, first);
        assert_eq!(history.all()[1].assignment, second);
    }

    #[test]
    fn stored_record_is_independent_of_the_original() {
        let mut history = DraftHistory::new();
        let mut assignment = sample_assignment();
        history.record(&assignment);

        // Mutating the original after recording must not reach the archive.
        assignment.teams[0].picks.push("intruder".to_string());
        assignment.teams[1].team = "Renamed".to_string();

        let stored = &history.all()[0].assignment;
        assert_eq!(stored.picks_for("A").unwrap().len(), 2);
        assert!(stored.picks_for("Renamed").is_none());
        assert_eq!(stored.picks_for("B").unwrap(), ["p2".to_string()]);
    }

    #[test]
    fn clear_empties_the_archive() {
        let mut history = DraftHistory::new();
        history.record(&sample_assignment());
        assert!(!history.is_empty());
        history.clear();
        assert!(history.is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_returns_the_stored_entry() {
        let mut history = DraftHistory::new();
        let record = history.record(&sample_assignment());
        assert_eq!(record.number, 1);
        assert_eq!(record.assignment.team_count(), 2);
    }
}
