//! Test module for determinism and integration tests.
//!
//! - `determinism.rs`: same seed produces identical matches
//! - `integration.rs`: full rounds through the simulator with scripted draws
//! - `helpers.rs`: fixtures and a scripted random source

mod helpers;
mod integration;
