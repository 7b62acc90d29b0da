//! Hours Engine library crate.
//!
//! This crate exposes the work-hour computation engine and API
//! components as reusable modules.  External applications may
//! depend on the `hours_engine` crate and call into
//! `engine::summarize_entries` or `engine::calculate_worked` directly,
//! or embed the API via `api::build_router`.

pub mod api;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod interval;
pub mod models;
pub mod store;
