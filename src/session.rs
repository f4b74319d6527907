// Session state and orchestration.
//
// A `DraftSession` owns both rosters, the draft archive, and the
// per-roster pending-error state, behind a single controller object the
// presentation layer drives. Mutations go through the session so the
// error banners stay in step with the rosters; the session never touches
// a terminal or a screen itself.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DraftConfig;
use crate::draft::engine::{self, AssignError};
use crate::draft::history::{DraftHistory, DraftRecord};
use crate::draft::roster::{EntryId, Roster, RosterError};
use crate::protocol::{RosterSnapshot, SessionSnapshot};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("draft is not ready: {teams} team(s) and {participants} participant(s)")]
    NotReady { teams: usize, participants: usize },

    #[error(transparent)]
    Assign(#[from] AssignError),
}

// ---------------------------------------------------------------------------
// DraftSession
// ---------------------------------------------------------------------------

/// The complete state of one roster-building and drafting session.
pub struct DraftSession {
    config: DraftConfig,
    teams: Roster,
    participants: Roster,
    history: DraftHistory,
    /// Pending validation message for the team list. Set by a failed
    /// add/rename, cleared by the next successful one.
    team_error: Option<RosterError>,
    participant_error: Option<RosterError>,
}

impl DraftSession {
    pub fn new(config: DraftConfig) -> Self {
        let teams = Roster::with_capacity(config.roster.team_capacity);
        DraftSession {
            config,
            teams,
            participants: Roster::new(),
            history: DraftHistory::new(),
            team_error: None,
            participant_error: None,
        }
    }

    // -- Team roster ------------------------------------------------------

    pub fn add_team(&mut self, name: &str) -> Result<EntryId, RosterError> {
        let result = self.teams.add(name);
        self.team_error = result.as_ref().err().cloned();
        if let Ok(id) = &result {
            info!("Team added: {} ({})", name.trim(), id);
        }
        result
    }

    pub fn begin_team_edit(&mut self, id: EntryId) -> Result<(), RosterError> {
        self.teams.begin_edit(id)
    }

    pub fn cancel_team_edit(&mut self) {
        self.teams.cancel_edit();
    }

    pub fn commit_team_edit(&mut self, id: EntryId, new_name: &str) -> Result<(), RosterError> {
        let result = self.teams.commit_edit(id, new_name);
        self.team_error = result.as_ref().err().cloned();
        result
    }

    /// Remove a team. Does not touch the error banner: a delete is not a
    /// validated entry, so it neither raises nor clears one.
    pub fn remove_team(&mut self, id: EntryId) -> Result<(), RosterError> {
        self.teams.remove(id)
    }

    // -- Participant roster -----------------------------------------------

    pub fn add_participant(&mut self, name: &str) -> Result<EntryId, RosterError> {
        let result = self.participants.add(name);
        self.participant_error = result.as_ref().err().cloned();
        if let Ok(id) = &result {
            info!("Participant added: {} ({})", name.trim(), id);
        }
        result
    }

    pub fn begin_participant_edit(&mut self, id: EntryId) -> Result<(), RosterError> {
        self.participants.begin_edit(id)
    }

    pub fn cancel_participant_edit(&mut self) {
        self.participants.cancel_edit();
    }

    pub fn commit_participant_edit(
        &mut self,
        id: EntryId,
        new_name: &str,
    ) -> Result<(), RosterError> {
        let result = self.participants.commit_edit(id, new_name);
        self.participant_error = result.as_ref().err().cloned();
        result
    }

    pub fn remove_participant(&mut self, id: EntryId) -> Result<(), RosterError> {
        self.participants.remove(id)
    }

    // -- Drafting ---------------------------------------------------------

    /// Whether both rosters meet their configured minimums.
    pub fn is_ready_for_draft(&self) -> bool {
        self.teams.is_ready(self.config.roster.min_teams)
            && self.participants.is_ready(self.config.roster.min_participants)
    }

    /// Run one draft over the current rosters and archive the result.
    ///
    /// The rosters themselves are untouched; the same lists can draft
    /// again. The caller supplies the random source so tests can seed it.
    pub fn start_draft(&mut self, rng: &mut impl Rng) -> Result<&DraftRecord, SessionError> {
        if !self.is_ready_for_draft() {
            debug!(
                "Draft refused: {} team(s), {} participant(s)",
                self.teams.len(),
                self.participants.len()
            );
            return Err(SessionError::NotReady {
                teams: self.teams.len(),
                participants: self.participants.len(),
            });
        }

        let assignment = engine::assign(&self.teams, &self.participants, rng)?;
        let record = self.history.record(&assignment);
        info!(
            "Draft #{} complete: {} participants over {} teams",
            record.number,
            record.assignment.participant_count(),
            record.assignment.team_count()
        );
        Ok(record)
    }

    // -- Views and lifecycle ----------------------------------------------

    /// A serializable view of the whole session for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            teams: RosterSnapshot::capture(&self.teams, self.team_error.as_ref()),
            participants: RosterSnapshot::capture(
                &self.participants,
                self.participant_error.as_ref(),
            ),
            ready_for_draft: self.is_ready_for_draft(),
            drafts_recorded: self.history.len(),
        }
    }

    /// Return to the just-started state: both rosters emptied, edit and
    /// error state gone, archive cleared.
    pub fn reset(&mut self) {
        self.teams = Roster::with_capacity(self.config.roster.team_capacity);
        self.participants = Roster::new();
        self.history.clear();
        self.team_error = None;
        self.participant_error = None;
        info!("Session reset");
    }

    pub fn teams(&self) -> &Roster {
        &self.teams
    }

    pub fn participants(&self) -> &Roster {
        &self.participants
    }

    pub fn history(&self) -> &DraftHistory {
        &self.history
    }

    pub fn team_error(&self) -> Option<&RosterError> {
        self.team_error.as_ref()
    }

    pub fn participant_error(&self) -> Option<&RosterError> {
        self.participant_error.as_ref()
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
