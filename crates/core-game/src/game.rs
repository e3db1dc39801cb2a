use crate::candle::{next_candle, round3, Candle};
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SellMarker {
    NotSold,
    SoldAt(f64),
}

impl SellMarker {
    pub fn price(self) -> Option<f64> {
        match self {
            Self::NotSold => None,
            Self::SoldAt(price) => Some(price),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickAdvance {
    pub step: u64,
    pub candle: Candle,
    pub countdown_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Ignored,
    Advanced(TickAdvance),
    Finished {
        advance: TickAdvance,
        settle_price: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub candles: Vec<Candle>,
    pub countdown_ms: u64,
    pub sell_price: Option<f64>,
    pub peak_price: f64,
    pub settle_price: Option<f64>,
    pub score: Option<f64>,
}

/// Single-owner state machine for one candle run. All operations outside
/// their valid phase are no-ops so rapid double inputs cannot corrupt a run.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    phase: Phase,
    candles: Vec<Candle>,
    step: u64,
    countdown_ms: u64,
    sell: SellMarker,
    settle_price: Option<f64>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        assert!(config.step_ms > 0, "step_ms must be positive");
        assert!(
            config.total_ms >= config.step_ms,
            "total_ms must cover at least one step"
        );
        assert!(
            config.start_price.is_finite() && config.start_price > 0.0,
            "start_price must be finite and positive"
        );

        Self {
            config,
            phase: Phase::Ready,
            candles: Vec::new(),
            step: 0,
            countdown_ms: config.total_ms,
            sell: SellMarker::NotSold,
            settle_price: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn countdown_ms(&self) -> u64 {
        self.countdown_ms
    }

    pub fn sell_marker(&self) -> SellMarker {
        self.sell
    }

    /// Begins a fresh run from `Ready` or `Ended`, discarding any prior run.
    /// Returns false (and changes nothing) while a run is in flight.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Running {
            return false;
        }

        self.phase = Phase::Running;
        self.candles.clear();
        self.candles.push(Candle::seed(self.config.start_price));
        self.step = 0;
        self.countdown_ms = self.config.total_ms;
        self.sell = SellMarker::NotSold;
        self.settle_price = None;
        true
    }

    /// Advances the run by one tick: appends the next candle and burns one
    /// step of countdown. The tick that exhausts the budget settles the run
    /// at the sell price when one was recorded, else at the final close.
    pub fn apply_tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Ignored;
        }

        self.step += 1;
        let candle = next_candle(self.last_close(), self.step);
        self.candles.push(candle);
        self.countdown_ms = self.countdown_ms.saturating_sub(self.config.step_ms);

        let advance = TickAdvance {
            step: self.step,
            candle,
            countdown_ms: self.countdown_ms,
        };

        if self.step >= self.config.max_steps() {
            let settle_price = self.sell.price().unwrap_or(candle.close);
            self.phase = Phase::Ended;
            self.settle_price = Some(settle_price);
            return TickOutcome::Finished {
                advance,
                settle_price,
            };
        }

        TickOutcome::Advanced(advance)
    }

    /// Records the current close as the sell price, at most once per run.
    /// Returns the recorded price, or None when the call was ignored.
    pub fn sell(&mut self) -> Option<f64> {
        if self.phase != Phase::Running {
            return None;
        }
        if let SellMarker::SoldAt(_) = self.sell {
            return None;
        }

        let price = self.last_close();
        self.sell = SellMarker::SoldAt(price);
        Some(price)
    }

    pub fn peak_price(&self) -> f64 {
        self.candles
            .iter()
            .fold(self.config.start_price, |peak, candle| peak.max(candle.high))
    }

    pub fn settle_price(&self) -> Option<f64> {
        self.settle_price
    }

    /// Peak minus settle, defined once the run has ended.
    pub fn score(&self) -> Option<f64> {
        let settle_price = self.settle_price?;
        Some(round3(self.peak_price() - settle_price))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            candles: self.candles.clone(),
            countdown_ms: self.countdown_ms,
            sell_price: self.sell.price(),
            peak_price: self.peak_price(),
            settle_price: self.settle_price,
            score: self.score(),
        }
    }

    fn last_close(&self) -> f64 {
        self.candles
            .last()
            .map(|candle| candle.close)
            .unwrap_or(self.config.start_price)
    }

    #[cfg(test)]
    pub(crate) fn with_run_for_test(candles: Vec<Candle>, sell: SellMarker, settle_price: f64) -> Self {
        Self {
            config: GameConfig::default(),
            phase: Phase::Ended,
            candles,
            step: 0,
            countdown_ms: 0,
            sell,
            settle_price: Some(settle_price),
        }
    }
}
