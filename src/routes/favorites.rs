use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState, store::FavoriteKind};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteTeams {
    favorite_teams: Vec<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoritePlayers {
    favorite_players: Vec<i32>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites/teams", get(list_teams))
        .route(
            "/favorites/teams/:team_id",
            axum::routing::post(add_team).delete(remove_team),
        )
        .route("/favorites/players", get(list_players))
        .route(
            "/favorites/players/:player_id",
            axum::routing::post(add_player).delete(remove_player),
        )
}

#[instrument(skip(state))]
async fn list_teams(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<axum::Json<FavoriteTeams>, ApiError> {
    let favorite_teams = state.store.favorites(&email, FavoriteKind::Team).await?;
    Ok(axum::Json(FavoriteTeams { favorite_teams }))
}

#[instrument(skip(state))]
async fn add_team(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(team_id): Path<i32>,
) -> Result<axum::Json<FavoriteTeams>, ApiError> {
    let favorite_teams = state
        .store
        .add_favorite(&email, FavoriteKind::Team, team_id)
        .await?;
    info!(email = %email, team_id, "favorite team added");
    Ok(axum::Json(FavoriteTeams { favorite_teams }))
}

#[instrument(skip(state))]
async fn remove_team(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(team_id): Path<i32>,
) -> Result<axum::Json<FavoriteTeams>, ApiError> {
    let favorite_teams = state
        .store
        .remove_favorite(&email, FavoriteKind::Team, team_id)
        .await?;
    info!(email = %email, team_id, "favorite team removed");
    Ok(axum::Json(FavoriteTeams { favorite_teams }))
}

#[instrument(skip(state))]
async fn list_players(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<axum::Json<FavoritePlayers>, ApiError> {
    let favorite_players = state.store.favorites(&email, FavoriteKind::Player).await?;
    Ok(axum::Json(FavoritePlayers { favorite_players }))
}

#[instrument(skip(state))]
async fn add_player(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(player_id): Path<i32>,
) -> Result<axum::Json<FavoritePlayers>, ApiError> {
    let favorite_players = state
        .store
        .add_favorite(&email, FavoriteKind::Player, player_id)
        .await?;
    info!(email = %email, player_id, "favorite player added");
    Ok(axum::Json(FavoritePlayers { favorite_players }))
}

#[instrument(skip(state))]
async fn remove_player(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(player_id): Path<i32>,
) -> Result<axum::Json<FavoritePlayers>, ApiError> {
    let favorite_players = state
        .store
        .remove_favorite(&email, FavoriteKind::Player, player_id)
        .await?;
    info!(email = %email, player_id, "favorite player removed");
    Ok(axum::Json(FavoritePlayers { favorite_players }))
}
