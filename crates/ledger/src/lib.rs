mod client;
mod service;
mod wallet;

use anyhow::bail;

pub use client::{HttpLedgerClient, LedgerClient, NullLedgerClient};
pub use service::LeaderboardService;
pub use wallet::{InMemoryWallet, WalletSession};

/// Fixed-point scale shared by score submission and leaderboard decoding.
/// The contract stores integer amounts; both directions must agree on the
/// factor or round trips drift.
pub const SCORE_SCALE: i64 = 1000;

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub const SUBMIT_FUNCTION: &str = "submitScore";
pub const LEADERBOARD_FUNCTION: &str = "getLowest20";

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub player: String,
    pub best_score: f64,
}

pub fn encode_score(score: f64) -> i64 {
    (score * SCORE_SCALE as f64).round() as i64
}

pub fn decode_score(raw: i64) -> f64 {
    raw as f64 / SCORE_SCALE as f64
}

pub fn zip_rows(players: Vec<String>, scores: Vec<i64>) -> anyhow::Result<Vec<LeaderboardRow>> {
    if players.len() != scores.len() {
        bail!(
            "leaderboard arrays differ in length: {} players, {} scores",
            players.len(),
            scores.len()
        );
    }

    Ok(players
        .into_iter()
        .zip(scores)
        .map(|(player, raw)| LeaderboardRow {
            player,
            best_score: decode_score(raw),
        })
        .collect())
}

pub fn short_addr(addr: &str) -> String {
    if addr.len() <= 10 {
        return addr.to_string();
    }
    format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
}
