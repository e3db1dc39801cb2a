use std::sync::Arc;

use anyhow::Result;

use crate::client::LedgerClient;
use crate::{encode_score, zip_rows, LeaderboardRow, ZERO_ADDRESS};

/// Leaderboard operations against one configured contract. The zero address
/// means "no contract deployed": reads return nothing and writes are skipped
/// instead of attempted.
pub struct LeaderboardService {
    client: Arc<dyn LedgerClient>,
    contract_address: String,
}

impl LeaderboardService {
    pub fn new(client: Arc<dyn LedgerClient>, contract_address: impl Into<String>) -> Self {
        Self {
            client,
            contract_address: contract_address.into(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.contract_address != ZERO_ADDRESS
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub async fn refresh(&self) -> Result<Vec<LeaderboardRow>> {
        if !self.enabled() {
            return Ok(Vec::new());
        }

        let (players, scores) = self.client.lowest_scores(&self.contract_address).await?;
        zip_rows(players, scores)
    }

    /// Encodes and submits a score; `Ok(None)` means the feature is disabled.
    pub async fn submit(&self, score: f64) -> Result<Option<String>> {
        if !self.enabled() {
            return Ok(None);
        }

        let tx_hash = self
            .client
            .submit_score(&self.contract_address, encode_score(score))
            .await?;
        Ok(Some(tx_hash))
    }
}
