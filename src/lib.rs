//! SWAPI Explorer Library
//!
//! Cached access to the Star Wars API, per-category statistics and the
//! terminal dashboard that displays them. The binary in `main.rs` is a thin
//! shell over these modules.

pub mod analysis;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod output;
pub mod ui;
