use core_game::{round3, Candle};

use crate::scale::PriceScale;

pub const MARGIN_TOP: f64 = 10.0;
pub const MARGIN_RIGHT: f64 = 12.0;
pub const MARGIN_BOTTOM: f64 = 16.0;
pub const MARGIN_LEFT: f64 = 36.0;
pub const BODY_WIDTH: f64 = 8.0;
pub const BODY_GAP: f64 = 3.0;

// Reserve the full run width up front so the viewport does not jump while
// candles stream in.
pub const MIN_SLOTS: usize = 40;

const MIN_BODY_HEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridline {
    pub price: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SellLine {
    pub price: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleShape {
    pub x: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub bullish: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    pub gridlines: Vec<Gridline>,
    pub sell_line: Option<SellLine>,
    pub candles: Vec<CandleShape>,
}

pub fn layout(candles: &[Candle], sell_price: Option<f64>, height: f64) -> ChartLayout {
    let inner_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    let scale = PriceScale::fit(candles, MARGIN_TOP, inner_height);

    let slots = candles.len().max(MIN_SLOTS);
    let width = MARGIN_LEFT + MARGIN_RIGHT + slots as f64 * (BODY_WIDTH + BODY_GAP);

    let gridlines = scale
        .gridline_prices()
        .into_iter()
        .map(|price| Gridline {
            price,
            y: scale.y(price),
        })
        .collect();

    let sell_line = sell_price.map(|price| SellLine {
        price,
        y: scale.y(price),
    });

    let candles = candles
        .iter()
        .enumerate()
        .map(|(i, candle)| candle_shape(candle, i, &scale))
        .collect();

    ChartLayout {
        width,
        height,
        plot_left: MARGIN_LEFT,
        plot_right: width - MARGIN_RIGHT,
        gridlines,
        sell_line,
        candles,
    }
}

fn candle_shape(candle: &Candle, index: usize, scale: &PriceScale) -> CandleShape {
    let x = MARGIN_LEFT + index as f64 * (BODY_WIDTH + BODY_GAP);
    let body_top = scale.y(round3(candle.open.max(candle.close)));
    let body_bottom = scale.y(round3(candle.open.min(candle.close)));

    CandleShape {
        x,
        body_top,
        body_height: (body_bottom - body_top).max(MIN_BODY_HEIGHT),
        wick_top: scale.y(candle.high),
        wick_bottom: scale.y(candle.low),
        bullish: candle.is_bullish(),
    }
}

#[cfg(test)]
mod tests {
    use core_game::{next_candle, Candle};

    use super::{layout, BODY_GAP, BODY_WIDTH, MARGIN_LEFT, MARGIN_RIGHT, MIN_SLOTS};

    fn short_run() -> Vec<Candle> {
        let mut candles = vec![Candle::seed(100.0)];
        for step in 1..=5 {
            let prev_close = candles.last().unwrap().close;
            candles.push(next_candle(prev_close, step));
        }
        candles
    }

    #[test]
    fn width_reserves_at_least_forty_slots() {
        let chart = layout(&short_run(), None, 240.0);

        let expected = MARGIN_LEFT + MARGIN_RIGHT + MIN_SLOTS as f64 * (BODY_WIDTH + BODY_GAP);
        assert_eq!(chart.width, expected);
    }

    #[test]
    fn width_grows_once_the_run_exceeds_the_reserved_slots() {
        let mut candles = vec![Candle::seed(100.0)];
        for step in 1..=45 {
            let prev_close = candles.last().unwrap().close;
            candles.push(next_candle(prev_close, step));
        }

        let chart = layout(&candles, None, 240.0);

        let expected = MARGIN_LEFT + MARGIN_RIGHT + 46.0 * (BODY_WIDTH + BODY_GAP);
        assert_eq!(chart.width, expected);
    }

    #[test]
    fn candles_are_spaced_one_slot_apart() {
        let chart = layout(&short_run(), None, 240.0);

        for (i, shape) in chart.candles.iter().enumerate() {
            assert_eq!(shape.x, MARGIN_LEFT + i as f64 * (BODY_WIDTH + BODY_GAP));
        }
    }

    #[test]
    fn flat_seed_candle_keeps_a_visible_body() {
        let chart = layout(&[Candle::seed(100.0)], None, 240.0);

        assert_eq!(chart.candles[0].body_height, 1.0);
    }

    #[test]
    fn wicks_start_above_the_body_and_point_down() {
        let chart = layout(&short_run(), None, 240.0);

        for shape in &chart.candles {
            assert!(shape.wick_top <= shape.body_top + 1e-9);
            assert!(shape.wick_bottom >= shape.wick_top);
        }
    }

    #[test]
    fn sell_line_is_present_only_when_a_sell_was_recorded() {
        let candles = short_run();

        let without = layout(&candles, None, 240.0);
        let with = layout(&candles, Some(101.5), 240.0);

        assert!(without.sell_line.is_none());
        let sell = with.sell_line.unwrap();
        assert_eq!(sell.price, 101.5);
        assert!(sell.y > 0.0 && sell.y < 240.0);
    }

    #[test]
    fn gridlines_carry_six_levels() {
        let chart = layout(&short_run(), None, 240.0);

        assert_eq!(chart.gridlines.len(), 6);
    }
}
