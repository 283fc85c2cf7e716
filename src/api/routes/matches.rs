//! Match listing, timeline and shared-match endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::calculate::{score_progression, sorted_recent_first, timeline_events};
use crate::models::{Match, TimelineEvent};
use crate::storage;

use super::load_team_matches;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub opponent: String,
    pub date: String,
    pub score: u32,
    pub opponent_score: u32,
    pub finished: bool,
    pub shareable: bool,
}

impl MatchSummary {
    fn from_match(m: &Match) -> Self {
        Self {
            id: m.id.to_string(),
            opponent: m.opponent.clone(),
            date: m.date.clone(),
            score: m.score,
            opponent_score: m.opponent_score,
            finished: m.finished,
            shareable: m.shareable,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchSummary>,
    pub pagination: PaginationMeta,
}

/// Finished matches for a team, most recent first, paginated.
pub async fn list_matches(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let all = load_team_matches(&state, &team_id)?;
    let ordered = sorted_recent_first(&all);

    let pagination = Pagination::new(params.page, params.page_size);
    let total = ordered.len() as u32;
    let page: Vec<MatchSummary> = ordered
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.page_size as usize)
        .map(MatchSummary::from_match)
        .collect();

    Ok(Json(MatchListResponse {
        matches: page,
        pagination: PaginationMeta::new(&pagination, total),
    }))
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub match_id: String,
    pub team_name: String,
    pub opponent: String,
    pub date: String,
    pub score: u32,
    pub opponent_score: u32,
    pub events: Vec<TimelineEvent>,

    /// Running (own, opponent) score after each event
    pub progression: Vec<(u32, u32)>,
}

impl TimelineResponse {
    fn from_match(m: &Match) -> Self {
        let events = timeline_events(m);
        let progression = score_progression(&events);
        Self {
            match_id: m.id.to_string(),
            team_name: m.team_name.clone(),
            opponent: m.opponent.clone(),
            date: m.date.clone(),
            score: m.score,
            opponent_score: m.opponent_score,
            events,
            progression,
        }
    }
}

pub async fn match_timeline(
    State(state): State<AppState>,
    Path((team_id, match_id)): Path<(String, String)>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    let m = matches
        .iter()
        .find(|m| m.id.as_str() == match_id)
        .ok_or_else(|| ApiError::NotFound(format!("match {}", match_id)))?;

    Ok(Json(TimelineResponse::from_match(m)))
}

/// Shared-match view, looked up by share token across all teams.
///
/// Only matches that are currently shareable resolve; a disabled share
/// keeps its token but answers 404.
pub async fn shared_match(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let team_ids = storage::list_match_files(&state.storage)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    for team_id in team_ids {
        let matches = storage::match_reader(&state.storage, &team_id)
            .read_all()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        if let Some(m) = matches
            .iter()
            .find(|m| m.shareable && m.share_token.as_deref() == Some(token.as_str()))
        {
            return Ok(Json(TimelineResponse::from_match(m)));
        }
    }

    Err(ApiError::NotFound("shared match".to_string()))
}
