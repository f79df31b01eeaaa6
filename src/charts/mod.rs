//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use renderer::{ChartContext, StaticChartRenderer};
