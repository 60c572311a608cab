use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    mlb::{
        types::{League, Player, Team, TeamStanding},
        MlbError,
    },
    state::AppState,
};

#[derive(Debug, Serialize)]
struct LeagueList {
    leagues: Vec<League>,
}

#[derive(Debug, Serialize)]
struct StandingsList {
    standings: Vec<TeamStanding>,
}

#[derive(Debug, Serialize)]
struct TeamResponse {
    team: Team,
}

#[derive(Debug, Serialize)]
struct PlayerResponse {
    player: Player,
}

/// Live summaries of everything the caller follows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse {
    favorite_teams: Vec<Team>,
    favorite_players: Vec<Player>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats/leagues", get(leagues))
        .route("/stats/standings/:league_id", get(standings))
        .route("/stats/teams/:team_id", get(team))
        .route("/stats/players/:player_id", get(player))
        .route("/stats/dashboard", get(dashboard))
}

#[instrument(skip(state))]
async fn leagues(State(state): State<AppState>) -> Result<axum::Json<LeagueList>, ApiError> {
    let leagues = state.mlb.leagues().await?;
    Ok(axum::Json(LeagueList { leagues }))
}

#[instrument(skip(state))]
async fn standings(
    State(state): State<AppState>,
    Path(league_id): Path<u32>,
) -> Result<axum::Json<StandingsList>, ApiError> {
    let standings = state.mlb.standings(league_id).await?;
    Ok(axum::Json(StandingsList { standings }))
}

#[instrument(skip(state))]
async fn team(
    State(state): State<AppState>,
    Path(team_id): Path<i32>,
) -> Result<axum::Json<TeamResponse>, ApiError> {
    let team = state.mlb.team(team_id).await.map_err(|err| match err {
        MlbError::NotFound => ApiError::NotFound(format!("No team: {team_id}")),
        other => ApiError::from(other),
    })?;
    Ok(axum::Json(TeamResponse { team }))
}

#[instrument(skip(state))]
async fn player(
    State(state): State<AppState>,
    Path(player_id): Path<i32>,
) -> Result<axum::Json<PlayerResponse>, ApiError> {
    let player = state.mlb.player(player_id).await.map_err(|err| match err {
        MlbError::NotFound => ApiError::NotFound(format!("No player: {player_id}")),
        other => ApiError::from(other),
    })?;
    Ok(axum::Json(PlayerResponse { player }))
}

#[instrument(skip(state))]
async fn dashboard(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<axum::Json<DashboardResponse>, ApiError> {
    let user = state
        .store
        .find(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user: {email}")))?;

    let mut favorite_teams = Vec::with_capacity(user.favorite_teams.len());
    for team_id in &user.favorite_teams {
        match state.mlb.team(*team_id).await {
            Ok(team) => favorite_teams.push(team),
            // A favorite that no longer resolves upstream is skipped, not
            // a dashboard failure.
            Err(MlbError::NotFound) => {
                warn!(email = %email, team_id, "favorite team unknown upstream")
            }
            Err(err) => return Err(err.into()),
        }
    }

    let mut favorite_players = Vec::with_capacity(user.favorite_players.len());
    for player_id in &user.favorite_players {
        match state.mlb.player(*player_id).await {
            Ok(player) => favorite_players.push(player),
            Err(MlbError::NotFound) => {
                warn!(email = %email, player_id, "favorite player unknown upstream")
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(axum::Json(DashboardResponse {
        favorite_teams,
        favorite_players,
    }))
}
