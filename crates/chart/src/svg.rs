use core_game::Candle;

use crate::layout::{layout, ChartLayout, BODY_WIDTH};

const BACKGROUND: &str = "#0b0b0b";
const GRID_STROKE: &str = "#333";
const LABEL_FILL: &str = "#888";
const SELL_STROKE: &str = "#f59e0b";
const BULL_FILL: &str = "#16a34a";
const BEAR_FILL: &str = "#dc2626";

pub fn render_svg(candles: &[Candle], sell_price: Option<f64>, height: f64) -> String {
    render_layout(&layout(candles, sell_price, height))
}

pub fn render_layout(chart: &ChartLayout) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"Candlestick price chart\">",
        w = chart.width,
        h = chart.height,
    ));
    out.push_str("<title>Candlestick price chart</title>");
    out.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{BACKGROUND}\" rx=\"12\"/>",
        chart.width, chart.height,
    ));

    for gridline in &chart.gridlines {
        out.push_str(&format!(
            "<line x1=\"{}\" x2=\"{}\" y1=\"{y}\" y2=\"{y}\" stroke=\"{GRID_STROKE}\" \
             stroke-dasharray=\"4 4\"/>",
            chart.plot_left,
            chart.plot_right,
            y = gridline.y,
        ));
        out.push_str(&format!(
            "<text x=\"4\" y=\"{}\" fill=\"{LABEL_FILL}\" font-size=\"10\">{:.3}</text>",
            gridline.y + 4.0,
            gridline.price,
        ));
    }

    if let Some(sell) = &chart.sell_line {
        out.push_str(&format!(
            "<line x1=\"{}\" x2=\"{}\" y1=\"{y}\" y2=\"{y}\" stroke=\"{SELL_STROKE}\" \
             stroke-width=\"2\"/>",
            chart.plot_left,
            chart.plot_right,
            y = sell.y,
        ));
        out.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" fill=\"{SELL_STROKE}\" font-size=\"12\" \
             font-weight=\"700\">{:.3}</text>",
            chart.plot_right - 40.0,
            sell.y - 6.0,
            sell.price,
        ));
    }

    for shape in &chart.candles {
        let color = if shape.bullish { BULL_FILL } else { BEAR_FILL };
        let wick_x = shape.x + BODY_WIDTH / 2.0;
        out.push_str(&format!(
            "<line x1=\"{wick_x}\" x2=\"{wick_x}\" y1=\"{}\" y2=\"{}\" stroke=\"{color}\"/>",
            shape.wick_top, shape.wick_bottom,
        ));
        out.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{BODY_WIDTH}\" height=\"{}\" fill=\"{color}\" rx=\"1\"/>",
            shape.x, shape.body_top, shape.body_height,
        ));
    }

    out.push_str("</svg>");
    out
}
