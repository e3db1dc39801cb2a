use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use ledger::short_addr;
use serde::Serialize;

use crate::state::{AppState, GameStateResponse};
use crate::ws;

const CHART_HEIGHT: f64 = 240.0;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/game", get(game_state))
        .route("/game/start", post(start_game))
        .route("/game/sell", post(sell))
        .route("/game/chart.svg", get(chart_svg))
        .route("/game/score/submit", post(submit_score))
        .route("/leaderboard", get(leaderboard))
        .route("/wallet", get(wallet_status))
        .route("/wallet/connect", post(connect_wallet))
        .route("/ws/events", get(ws::events_socket))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn session_gone() -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "game session unavailable")
}

async fn game_state(State(state): State<AppState>) -> Result<Json<GameStateResponse>, ApiError> {
    let snapshot = state.session.snapshot().await.map_err(|_| session_gone())?;
    Ok(Json(snapshot.into()))
}

async fn start_game(State(state): State<AppState>) -> Result<Json<GameStateResponse>, ApiError> {
    let snapshot = state.session.start().await.map_err(|_| session_gone())?;
    Ok(Json(snapshot.into()))
}

async fn sell(State(state): State<AppState>) -> Result<Json<GameStateResponse>, ApiError> {
    let snapshot = state.session.sell().await.map_err(|_| session_gone())?;
    Ok(Json(snapshot.into()))
}

async fn chart_svg(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.session.snapshot().await.map_err(|_| session_gone())?;
    let svg = chart::render_svg(&snapshot.candles, snapshot.sell_price, CHART_HEIGHT);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

#[derive(Debug, Serialize)]
struct LeaderboardEntry {
    rank: usize,
    player: String,
    display: String,
    best_score: f64,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    enabled: bool,
    rows: Vec<LeaderboardEntry>,
}

async fn leaderboard(State(state): State<AppState>) -> Result<Json<LeaderboardResponse>, ApiError> {
    if !state.leaderboard.enabled() {
        return Ok(Json(LeaderboardResponse {
            enabled: false,
            rows: Vec::new(),
        }));
    }

    let rows = state
        .leaderboard
        .refresh()
        .await
        .map_err(|err| api_error(StatusCode::BAD_GATEWAY, err.to_string()))?;

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            rank: i + 1,
            display: short_addr(&row.player),
            player: row.player,
            best_score: row.best_score,
        })
        .collect();

    Ok(Json(LeaderboardResponse {
        enabled: true,
        rows,
    }))
}

#[derive(Debug, Serialize)]
struct SubmitScoreResponse {
    submitted: bool,
    score: f64,
    tx_hash: Option<String>,
}

async fn submit_score(
    State(state): State<AppState>,
) -> Result<Json<SubmitScoreResponse>, ApiError> {
    if !state.wallet.is_connected() {
        return Err(api_error(StatusCode::CONFLICT, "wallet not connected"));
    }

    let snapshot = state.session.snapshot().await.map_err(|_| session_gone())?;
    let score = snapshot
        .score
        .ok_or_else(|| api_error(StatusCode::CONFLICT, "no finished run to submit"))?;

    let tx_hash = state
        .leaderboard
        .submit(score)
        .await
        .map_err(|err| api_error(StatusCode::BAD_GATEWAY, err.to_string()))?;

    Ok(Json(SubmitScoreResponse {
        submitted: tx_hash.is_some(),
        score,
        tx_hash,
    }))
}

#[derive(Debug, Serialize)]
struct WalletStatusResponse {
    connected: bool,
}

async fn wallet_status(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    Json(WalletStatusResponse {
        connected: state.wallet.is_connected(),
    })
}

async fn connect_wallet(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    state.wallet.connect();
    Json(WalletStatusResponse { connected: true })
}
