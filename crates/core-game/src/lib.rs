mod candle;
mod config;
mod game;

pub use candle::{next_candle, round3, Candle, MIN_PRICE};
pub use config::GameConfig;
pub use game::{Game, GameSnapshot, Phase, SellMarker, TickAdvance, TickOutcome};
