//! The forecast display pipeline
//!
//! A pure, synchronous pass from parsed feed data to display strings, run
//! once per successful fetch: unit conversion and icon selection in
//! [`convert`], one card per calendar date in [`daily`], and the
//! assembled screen data in [`view`].

pub mod convert;
pub mod daily;
pub mod view;

pub use convert::{
    day_night_icon, format_celsius, format_visibility, format_wind_speed, ConvertError,
};
pub use daily::select_daily_representatives;
pub use view::{build_forecast_view, EntryView, ForecastView, ViewError};
