//! Game admission and settlement handlers.
//!
//! Creation is the admission gate: the stake is debited atomically or the
//! wager is refused. Settlement moves a game out of `active` exactly once
//! and applies the payout or refund afterwards.

use crate::{
    auth::middleware::CurrentUser,
    types::{AppError, Game, GameStatus, MessageResponse, Result},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to open a new wager.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    /// Kind of game the stake is placed on (free-form label)
    pub game_type: Option<String>,
    /// Stake in coins, must be positive and covered by the balance
    pub bet_amount: Option<i64>,
}

/// Request to settle an active game.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SettleGameRequest {
    /// Terminal status: "won", "lost" or "cancelled"
    pub status: Option<GameStatus>,
    /// Coins credited on a win; not allowed for other outcomes
    pub payout: Option<i64>,
}

/// Envelope for a created game.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameCreatedResponse {
    /// Creation confirmation
    pub message: String,
    /// The newly created game, always in `active` status
    pub game: Game,
}

/// Envelope for game listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct GamesListResponse {
    /// The caller's games, newest first
    pub games: Vec<Game>,
}

/// Envelope for a single game.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameResponse {
    /// The requested game
    pub game: Game,
}

/// Open a new wager
#[utoipa::path(
    post,
    path = "/api/games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created successfully", body = GameCreatedResponse),
        (status = 400, description = "Missing fields, non-positive stake, or insufficient coins"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "games",
    security(("bearer" = []))
)]
pub async fn create_game(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameCreatedResponse>)> {
    let (game_type, bet_amount) = match (payload.game_type.as_deref(), payload.bet_amount) {
        (Some(game_type), Some(bet_amount)) if !game_type.is_empty() => (game_type, bet_amount),
        _ => {
            return Err(AppError::InvalidInput(
                "Game type and bet amount are required".to_string(),
            ));
        }
    };

    let game = state.admissions.admit(&user, game_type, bet_amount).await?;

    tracing::info!(
        user_id = %user.id,
        game_id = %game.id,
        bet_amount,
        "wager admitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(GameCreatedResponse {
            message: "Game created successfully".to_string(),
            game,
        }),
    ))
}

/// List the caller's games
#[utoipa::path(
    get,
    path = "/api/games",
    responses(
        (status = 200, description = "Games owned by the caller, newest first", body = GamesListResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "games",
    security(("bearer" = []))
)]
pub async fn list_games(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<GamesListResponse>> {
    let games = state.store.get_user_games(&user.id).await?;

    Ok(Json(GamesListResponse { games }))
}

/// Fetch one game by id
#[utoipa::path(
    get,
    path = "/api/games/{game_id}",
    params(
        ("game_id" = String, Path, description = "Game ID")
    ),
    responses(
        (status = 200, description = "The requested game", body = GameResponse),
        (status = 404, description = "Game absent or owned by another user"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "games",
    security(("bearer" = []))
)]
pub async fn get_game(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>> {
    let game = state
        .store
        .get_game(&game_id, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;

    Ok(Json(GameResponse { game }))
}

/// Settle an active game
#[utoipa::path(
    put,
    path = "/api/games/{game_id}",
    params(
        ("game_id" = String, Path, description = "Game ID")
    ),
    request_body = SettleGameRequest,
    responses(
        (status = 200, description = "Game updated successfully", body = MessageResponse),
        (status = 400, description = "Invalid status or payout, or game already settled"),
        (status = 404, description = "Game absent or owned by another user"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "games",
    security(("bearer" = []))
)]
pub async fn settle_game(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_id): Path<String>,
    Json(payload): Json<SettleGameRequest>,
) -> Result<Json<MessageResponse>> {
    let status = payload
        .status
        .ok_or_else(|| AppError::InvalidInput("Status is required".to_string()))?;

    if !status.is_terminal() {
        return Err(AppError::InvalidInput(
            "Status must be won, lost, or cancelled".to_string(),
        ));
    }

    let payout = match status {
        GameStatus::Won => match payload.payout {
            Some(payout) if payout >= 0 => Some(payout),
            Some(_) => {
                return Err(AppError::InvalidInput(
                    "Payout must not be negative".to_string(),
                ));
            }
            None => None,
        },
        _ => {
            if payload.payout.is_some() {
                return Err(AppError::InvalidInput(
                    "Payout is only allowed for won games".to_string(),
                ));
            }
            None
        }
    };

    let game = state
        .store
        .settle_game(&game_id, &user.id, status, payout)
        .await?;

    // Credits run after the conditional flip, so each settlement pays at
    // most once.
    match status {
        GameStatus::Won => {
            if let Some(payout) = payout {
                if payout > 0 {
                    state.store.credit_coins(&user.id, payout).await?;
                }
            }
        }
        GameStatus::Cancelled => {
            state.store.credit_coins(&user.id, game.bet_amount).await?;
        }
        GameStatus::Lost | GameStatus::Active => {}
    }

    tracing::info!(
        user_id = %user.id,
        game_id = %game_id,
        status = status.as_str(),
        "game settled"
    );

    Ok(Json(MessageResponse {
        message: "Game updated successfully".to_string(),
    }))
}
