pub const MIN_PRICE: f64 = 1.0;

const BASE_DRIFT: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn seed(price: f64) -> Self {
        let price = round3(price);
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

pub fn next_candle(prev_close: f64, step: u64) -> Candle {
    let s = step as f64;
    let wave = 0.015 * (s * 0.8).sin() + 0.01 * (s * 0.23).sin() - 0.012 * (s * 0.51).sin();
    let delta = BASE_DRIFT + wave;

    let close = (prev_close * (1.0 + delta)).max(MIN_PRICE);
    let high = prev_close.max(close) * (1.0 + 0.004 + 0.002 * (s * 1.2).sin());
    let low = prev_close.min(close) * (1.0 - 0.004 - 0.002 * (s * 0.9).cos());

    Candle {
        open: round3(prev_close),
        high: round3(high),
        low: round3(low),
        close: round3(close),
    }
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::{next_candle, round3, Candle, MIN_PRICE};

    fn is_three_decimal(value: f64) -> bool {
        ((value * 1000.0).round() - value * 1000.0).abs() < 1e-6
    }

    #[test]
    fn seed_candle_is_flat() {
        let candle = Candle::seed(100.0);

        assert_eq!(candle.open, 100.0);
        assert_eq!(candle.high, 100.0);
        assert_eq!(candle.low, 100.0);
        assert_eq!(candle.close, 100.0);
        assert!(candle.is_bullish());
    }

    #[test]
    fn next_candle_is_deterministic() {
        let a = next_candle(100.0, 7);
        let b = next_candle(100.0, 7);

        assert_eq!(a, b);
    }

    #[test]
    fn wicks_bracket_the_body_for_many_steps() {
        let mut prev_close = 100.0;

        for step in 1..=200 {
            let candle = next_candle(prev_close, step);

            assert!(candle.high >= candle.open.max(candle.close), "step {step}");
            assert!(candle.low <= candle.open.min(candle.close), "step {step}");
            prev_close = candle.close;
        }
    }

    #[test]
    fn all_fields_are_rounded_to_three_decimals() {
        let candle = next_candle(103.456, 13);

        assert!(is_three_decimal(candle.open));
        assert!(is_three_decimal(candle.high));
        assert!(is_three_decimal(candle.low));
        assert!(is_three_decimal(candle.close));
    }

    #[test]
    fn open_equals_previous_close() {
        let candle = next_candle(104.125, 3);

        assert_eq!(candle.open, 104.125);
    }

    #[test]
    fn close_never_drops_below_price_floor() {
        let candle = next_candle(MIN_PRICE, 5);

        assert!(candle.close >= MIN_PRICE);
    }

    #[test]
    fn round3_rounds_to_nearest_thousandth() {
        assert_eq!(round3(1.23449), 1.234);
        assert_eq!(round3(1.2346), 1.235);
        assert_eq!(round3(100.0), 100.0);
    }
}
