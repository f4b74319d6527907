// Randomized round-robin assignment of participants to teams.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::roster::Roster;

/// Minimum roster sizes for a meaningful draft. Callers gate on
/// `Roster::is_ready` before invoking the engine; `assign` re-checks so a
/// mis-sequenced caller gets a typed error instead of a degenerate result.
pub const MIN_TEAMS: usize = 2;
pub const MIN_PARTICIPANTS: usize = 2;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignError {
    #[error(
        "not enough entries to draft: {teams} team(s) and {participants} participant(s); \
         need at least 2 of each"
    )]
    InsufficientEntries { teams: usize, participants: usize },
}

// ---------------------------------------------------------------------------
// Assignment result
// ---------------------------------------------------------------------------

/// One team's share of a completed draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub team: String,
    /// Participants assigned to this team, in the order they were drawn.
    pub picks: Vec<String>,
}

/// The result of one draft run: every team from the team roster, in roster
/// order, each with its ordered list of participants. Teams that received
/// no participants are present with an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub teams: Vec<TeamAssignment>,
}

impl Assignment {
    /// The picks for a team, looked up by name.
    pub fn picks_for(&self, team: &str) -> Option<&[String]> {
        self.teams
            .iter()
            .find(|t| t.team == team)
            .map(|t| t.picks.as_slice())
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Total participants across all teams.
    pub fn participant_count(&self) -> usize {
        self.teams.iter().map(|t| t.picks.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Run one draft: shuffle the participants and deal them to the teams
/// round-robin.
///
/// Fails with `InsufficientEntries` when either roster is below its
/// minimum; past the guard the run cannot fail. The caller supplies the
/// random source so tests can seed it.
pub fn assign(
    teams: &Roster,
    participants: &Roster,
    rng: &mut impl Rng,
) -> Result<Assignment, AssignError> {
    if teams.len() < MIN_TEAMS || participants.len() < MIN_PARTICIPANTS {
        return Err(AssignError::InsufficientEntries {
            teams: teams.len(),
            participants: participants.len(),
        });
    }
    Ok(assign_unchecked(teams, participants, rng))
}

/// The guard-free assignment path.
///
/// Total for any non-empty team roster and any participant count: zero
/// participants yields every team with an empty pick list. An empty team
/// roster yields an empty assignment (there is nowhere to deal to).
pub fn assign_unchecked(teams: &Roster, participants: &Roster, rng: &mut impl Rng) -> Assignment {
    let mut buckets: Vec<TeamAssignment> = teams
        .names()
        .map(|name| TeamAssignment {
            team: name.to_string(),
            picks: Vec::new(),
        })
        .collect();

    let team_count = buckets.len();
    if team_count == 0 {
        return Assignment { teams: buckets };
    }

    let mut pool: Vec<String> = participants.names().map(String::from).collect();
    shuffle(&mut pool, rng);

    // Deal the shuffled pool round-robin: position i goes to team i mod T,
    // so earlier teams receive the extra pick when the count is uneven.
    for (i, name) in pool.into_iter().enumerate() {
        buckets[i % team_count].picks.push(name);
    }

    Assignment { teams: buckets }
}

/// Fisher-Yates shuffle: for `i` from `len-1` down to `1`, draw `j`
/// uniformly from `[0, i]` and swap. Every permutation is equally likely
/// given an unbiased source.
fn shuffle(items: &mut [String], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
