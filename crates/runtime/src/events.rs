use core_game::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted,
    BarAppended {
        step: u64,
        candle: Candle,
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
