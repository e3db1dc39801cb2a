use core_game::{round3, Candle};

pub const GRID_DIVISIONS: usize = 5;

const FALLBACK_MIN: f64 = 90.0;
const FALLBACK_MAX: f64 = 110.0;
const RANGE_PAD_RATIO: f64 = 0.05;
const DEGENERATE_PAD: f64 = 5.0;

/// Affine price-to-vertical mapping over the padded extent of a candle run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    pub price_min: f64,
    pub price_max: f64,
    top: f64,
    inner_height: f64,
}

impl PriceScale {
    pub fn fit(candles: &[Candle], top: f64, inner_height: f64) -> Self {
        let (min, max) = price_extent(candles);
        let range = max - min;
        let pad = if range > 0.0 {
            range * RANGE_PAD_RATIO
        } else {
            DEGENERATE_PAD
        };

        Self {
            price_min: min - pad,
            price_max: max + pad,
            top,
            inner_height,
        }
    }

    pub fn y(&self, price: f64) -> f64 {
        let span = self.price_max - self.price_min;
        self.top + (self.price_max - price) * (self.inner_height / span)
    }

    pub fn gridline_prices(&self) -> Vec<f64> {
        let span = self.price_max - self.price_min;
        (0..=GRID_DIVISIONS)
            .map(|i| round3(self.price_min + span * i as f64 / GRID_DIVISIONS as f64))
            .collect()
    }
}

fn price_extent(candles: &[Candle]) -> (f64, f64) {
    if candles.is_empty() {
        return (FALLBACK_MIN, FALLBACK_MAX);
    }

    candles.iter().fold((f64::MAX, f64::MIN), |(min, max), candle| {
        (min.min(candle.low), max.max(candle.high))
    })
}
