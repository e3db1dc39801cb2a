mod layout;
mod scale;
mod svg;

pub use layout::{layout, CandleShape, ChartLayout, Gridline, SellLine};
pub use scale::{PriceScale, GRID_DIVISIONS};
pub use svg::{render_layout, render_svg};
