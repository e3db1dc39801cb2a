use std::sync::Arc;

use core_game::{Candle, GameConfig, GameSnapshot, Phase};
use ledger::{InMemoryWallet, LeaderboardService, NullLedgerClient, WalletSession, ZERO_ADDRESS};
use runtime::{spawn_session, GameEvent, GameSessionHandle};

#[derive(Clone)]
pub struct AppState {
    pub session: GameSessionHandle,
    pub leaderboard: Arc<LeaderboardService>,
    pub wallet: Arc<dyn WalletSession>,
}

impl AppState {
    pub fn new(
        session: GameSessionHandle,
        leaderboard: Arc<LeaderboardService>,
        wallet: Arc<dyn WalletSession>,
    ) -> Self {
        Self {
            session,
            leaderboard,
            wallet,
        }
    }

    /// Default wiring: a fresh session, no contract, disconnected wallet.
    pub fn with_defaults() -> Self {
        Self::new(
            spawn_session(GameConfig::default()),
            Arc::new(LeaderboardService::new(
                Arc::new(NullLedgerClient),
                ZERO_ADDRESS,
            )),
            Arc::new(InMemoryWallet::new()),
        )
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CandleDto {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<Candle> for CandleDto {
    fn from(candle: Candle) -> Self {
        Self {
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
        }
    }
}

pub fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Ready => "ready",
        Phase::Running => "running",
        Phase::Ended => "ended",
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GameStateResponse {
    pub phase: &'static str,
    pub countdown_ms: u64,
    pub candles: Vec<CandleDto>,
    pub sell_price: Option<f64>,
    pub peak_price: f64,
    pub settle_price: Option<f64>,
    pub score: Option<f64>,
}

impl From<GameSnapshot> for GameStateResponse {
    fn from(snapshot: GameSnapshot) -> Self {
        Self {
            phase: phase_name(snapshot.phase),
            countdown_ms: snapshot.countdown_ms,
            candles: snapshot.candles.into_iter().map(CandleDto::from).collect(),
            sell_price: snapshot.sell_price,
            peak_price: snapshot.peak_price,
            settle_price: snapshot.settle_price,
            score: snapshot.score,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum WireEvent {
    Connected,
    RunStarted,
    BarAppended {
        step: u64,
        candle: CandleDto,
        countdown_ms: u64,
    },
    SellRecorded {
        price: f64,
    },
    RunFinished {
        settle_price: f64,
        peak_price: f64,
        score: f64,
    },
}

impl WireEvent {
    pub fn connected() -> Self {
        Self::Connected
    }
}

impl From<GameEvent> for WireEvent {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::RunStarted => Self::RunStarted,
            GameEvent::BarAppended {
                step,
                candle,
                countdown_ms,
            } => Self::BarAppended {
                step,
                candle: candle.into(),
                countdown_ms,
            },
            GameEvent::SellRecorded { price } => Self::SellRecorded { price },
            GameEvent::RunFinished {
                settle_price,
                peak_price,
                score,
            } => Self::RunFinished {
                settle_price,
                peak_price,
                score,
            },
        }
    }
}
