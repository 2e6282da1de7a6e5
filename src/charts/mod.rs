//! Charts module - Chart rendering

mod plotter;

pub use plotter::{
    ChartPlotter, CITY_COLOR, MOVING_AVERAGE_COLOR, TEMPERATURE_COLOR, TEMPERATURE_SERIES,
};
