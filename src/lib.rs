//! Skycast library
//!
//! Terminal viewer for OpenWeatherMap city forecasts. The modules here are
//! shared by the binary and the integration tests: `forecast` holds the
//! pure conversion pipeline from raw API readings to display strings,
//! `data` the API client and forecast types, and `app` the keyboard-driven
//! state machine rendered by `ui`.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod forecast;
pub mod ui;
