//! Statistics endpoints: everything the calculation engine derives.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::models::{
    FormEntry, MonthlyTrendBucket, OpponentRecord, PlayerCareerStat, PlayerOfMonth,
    PlayerSeasonStat, ShotTypeTrendReport, TeamSeasonSummary,
};

use super::load_team_matches;

pub async fn season(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamSeasonSummary>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    Ok(Json(calculate::season_summary(&matches)))
}

#[derive(Debug, Deserialize)]
pub struct FormParams {
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub entries: Vec<FormEntry>,
}

pub async fn form(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<FormParams>,
) -> Result<Json<FormResponse>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    let n = params.n.unwrap_or(state.stats.form_window);
    Ok(Json(FormResponse {
        entries: calculate::form_last_n(&matches, n),
    }))
}

#[derive(Debug, Serialize)]
pub struct MonthlyTrendsResponse {
    pub buckets: Vec<MonthlyTrendBucket>,
}

pub async fn monthly(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<MonthlyTrendsResponse>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    Ok(Json(MonthlyTrendsResponse {
        buckets: calculate::monthly_trends(&matches),
    }))
}

#[derive(Debug, Deserialize)]
pub struct TopPlayersParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TopPlayersResponse {
    pub players: Vec<PlayerSeasonStat>,
}

pub async fn top_players(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<TopPlayersParams>,
) -> Result<Json<TopPlayersResponse>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    let limit = params.limit.unwrap_or(state.stats.top_players_limit);
    Ok(Json(TopPlayersResponse {
        players: calculate::top_players(&matches, limit),
    }))
}

#[derive(Debug, Serialize)]
pub struct OpponentsResponse {
    pub opponents: Vec<OpponentRecord>,
}

pub async fn opponents(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<OpponentsResponse>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    Ok(Json(OpponentsResponse {
        opponents: calculate::opponent_stats(&matches),
    }))
}

#[derive(Debug, Serialize)]
pub struct CareerResponse {
    pub players: Vec<PlayerCareerStat>,
}

pub async fn career(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<CareerResponse>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    Ok(Json(CareerResponse {
        players: calculate::player_career_stats(&matches),
    }))
}

#[derive(Debug, Serialize)]
pub struct PlayerOfMonthResponse {
    /// Null when nobody scored in the trailing window
    pub player: Option<PlayerOfMonth>,
}

pub async fn player_of_month(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<PlayerOfMonthResponse>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    Ok(Json(PlayerOfMonthResponse {
        player: calculate::player_of_month(&matches, Utc::now()),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ShotTypeTrendParams {
    pub n: Option<usize>,
}

pub async fn shot_type_trend(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<ShotTypeTrendParams>,
) -> Result<Json<ShotTypeTrendReport>, ApiError> {
    let matches = load_team_matches(&state, &team_id)?;
    let n = params.n.unwrap_or(state.stats.trend_window);
    Ok(Json(calculate::shot_type_trend(&matches, n)))
}
