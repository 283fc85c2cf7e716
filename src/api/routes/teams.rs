//! Team endpoints: listing, detail and duplicate-merge suggestions.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::suggest_merge_target;
use crate::models::{Player, Team};
use crate::storage;

use super::load_team;

#[derive(Debug, Serialize)]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    pub player_count: u32,
    pub match_count: u32,
    pub created_at: String,
    pub invite_code: String,
}

impl TeamInfo {
    fn new(team: &Team, match_count: u32) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name.clone(),
            player_count: team.players.len() as u32,
            match_count,
            created_at: team.created_at.to_rfc3339(),
            invite_code: team.invite_code.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<TeamInfo>,
}

pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<Json<TeamsResponse>, ApiError> {
    let teams = storage::team_reader(&state.storage)
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let counts = storage::match_counts(&state.storage)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let teams = teams
        .iter()
        .map(|t| TeamInfo::new(t, counts.get(&t.id).copied().unwrap_or(0)))
        .collect();

    Ok(Json(TeamsResponse { teams }))
}

#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub invite_code: String,
    pub players: Vec<Player>,
}

pub async fn team_detail(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamDetailResponse>, ApiError> {
    let team = load_team(&state, &team_id)?;
    Ok(Json(TeamDetailResponse {
        id: team.id.to_string(),
        name: team.name.clone(),
        created_at: team.created_at.to_rfc3339(),
        invite_code: team.invite_code.clone(),
        players: team.players,
    }))
}

#[derive(Debug, Serialize)]
pub struct DuplicateGroup {
    pub name: String,
    pub teams: Vec<TeamInfo>,

    /// Which team the others should merge into
    pub suggested_target: String,
}

#[derive(Debug, Serialize)]
pub struct DuplicatesResponse {
    pub groups: Vec<DuplicateGroup>,
}

/// Teams sharing a name (case-insensitive), each group with a merge target.
pub async fn duplicate_teams(
    State(state): State<AppState>,
) -> Result<Json<DuplicatesResponse>, ApiError> {
    let teams = storage::team_reader(&state.storage)
        .read_all()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let counts = storage::match_counts(&state.storage)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut by_name: HashMap<String, Vec<Team>> = HashMap::new();
    for team in teams {
        by_name
            .entry(team.name.to_lowercase())
            .or_default()
            .push(team);
    }

    let mut groups: Vec<DuplicateGroup> = by_name
        .into_values()
        .filter(|group| group.len() > 1)
        .filter_map(|group| {
            let target = suggest_merge_target(&group, &counts)?;
            let suggested_target = target.id.to_string();
            Some(DuplicateGroup {
                name: group[0].name.clone(),
                suggested_target,
                teams: group
                    .iter()
                    .map(|t| TeamInfo::new(t, counts.get(&t.id).copied().unwrap_or(0)))
                    .collect(),
            })
        })
        .collect();

    groups.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(DuplicatesResponse { groups }))
}
