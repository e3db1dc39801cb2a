mod config;
mod wiring;

use std::error::Error;
use std::sync::Arc;

use api::state::AppState;
use core_game::GameConfig;
use ledger::{
    HttpLedgerClient, InMemoryWallet, LeaderboardService, LedgerClient, NullLedgerClient,
    ZERO_ADDRESS,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = config::Config::from_env()?;

    let client: Arc<dyn LedgerClient> = if config.contract_address == ZERO_ADDRESS {
        Arc::new(NullLedgerClient)
    } else {
        Arc::new(HttpLedgerClient::new(&config.ledger_gateway_url)?)
    };
    let leaderboard = Arc::new(LeaderboardService::new(client, config.contract_address));

    let state = AppState::new(
        runtime::spawn_session(GameConfig::default()),
        leaderboard,
        Arc::new(InMemoryWallet::new()),
    );

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, wiring::build_app(state)).await?;
    Ok(())
}
