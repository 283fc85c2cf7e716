pub mod matches;
pub mod stats;
pub mod teams;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Match, Team};
use crate::storage;

/// Look up a team by id, or 404.
pub(crate) fn load_team(state: &AppState, team_id: &str) -> Result<Team, ApiError> {
    storage::team_reader(&state.storage)
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .into_iter()
        .find(|t| t.id.as_str() == team_id)
        .ok_or_else(|| ApiError::NotFound(format!("team {}", team_id)))
}

/// A team's stored matches, verifying the team exists first.
pub(crate) fn load_team_matches(
    state: &AppState,
    team_id: &str,
) -> Result<Vec<Match>, ApiError> {
    load_team(state, team_id)?;
    storage::match_reader(&state.storage, team_id)
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))
}
