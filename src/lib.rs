//! Recyclable-waste collection report for the Puntos Verdes drop-off network
//! and the door-to-door zone program.
//!
//! The stages are plain functions over explicit containers: load the logs
//! and the drop-off coordinates, reduce them to summaries, then write charts,
//! maps and a JSON summary.

pub mod charts;
pub mod config;
pub mod error;
pub mod geo;
pub mod loader;
pub mod maps;
pub mod output;
pub mod reports;
pub mod types;
pub mod util;
