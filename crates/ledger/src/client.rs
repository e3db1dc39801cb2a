use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::{LEADERBOARD_FUNCTION, SUBMIT_FUNCTION};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);
const CONFIRM_POLL_ATTEMPTS: u32 = 20;

/// Narrow view of the on-chain leaderboard: one write and one read, both in
/// the contract's integer score units.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submits a scaled score and resolves once the transaction confirms.
    async fn submit_score(&self, contract: &str, scaled_score: i64) -> Result<String>;

    /// Reads the `getLowest20` parallel arrays of (players, raw scores).
    async fn lowest_scores(&self, contract: &str) -> Result<(Vec<String>, Vec<i64>)>;
}

/// Stand-in for a missing gateway; every call fails with a clear message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLedgerClient;

#[async_trait]
impl LedgerClient for NullLedgerClient {
    async fn submit_score(&self, _contract: &str, _scaled_score: i64) -> Result<String> {
        bail!("no ledger gateway configured")
    }

    async fn lowest_scores(&self, _contract: &str) -> Result<(Vec<String>, Vec<i64>)> {
        bail!("no ledger gateway configured")
    }
}

/// Talks to a JSON ledger gateway that signs and relays contract calls.
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ContractCall<'a> {
    function: &'a str,
    args: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct WriteReceipt {
    tx_hash: String,
}

#[derive(Debug, Deserialize)]
struct TransactionStatus {
    status: String,
}

#[derive(Debug, Deserialize)]
struct LowestScores {
    players: Vec<String>,
    scores: Vec<i64>,
}

impl HttpLedgerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building ledger gateway client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<()> {
        for _ in 0..CONFIRM_POLL_ATTEMPTS {
            let status: TransactionStatus = self
                .http
                .get(format!("{}/transactions/{tx_hash}", self.base_url))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await
                .context("decoding transaction status")?;

            match status.status.as_str() {
                "confirmed" => return Ok(()),
                "failed" => bail!("transaction {tx_hash} failed on chain"),
                _ => tokio::time::sleep(CONFIRM_POLL_INTERVAL).await,
            }
        }

        bail!("transaction {tx_hash} unconfirmed after {CONFIRM_POLL_ATTEMPTS} polls")
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn submit_score(&self, contract: &str, scaled_score: i64) -> Result<String> {
        let call = ContractCall {
            function: SUBMIT_FUNCTION,
            args: vec![scaled_score],
        };

        let receipt: WriteReceipt = self
            .http
            .post(format!("{}/contracts/{contract}/transactions", self.base_url))
            .json(&call)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding submit receipt")?;

        self.wait_for_confirmation(&receipt.tx_hash).await?;
        Ok(receipt.tx_hash)
    }

    async fn lowest_scores(&self, contract: &str) -> Result<(Vec<String>, Vec<i64>)> {
        let call = ContractCall {
            function: LEADERBOARD_FUNCTION,
            args: Vec::new(),
        };

        let lowest: LowestScores = self
            .http
            .post(format!("{}/contracts/{contract}/calls", self.base_url))
            .json(&call)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding leaderboard read")?;

        Ok((lowest.players, lowest.scores))
    }
}
