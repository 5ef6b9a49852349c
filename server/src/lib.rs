//! Arcade table server library.
//!
//! This module exposes the controller components for use in tests and the
//! binary.

pub mod config;
pub mod game_loop;
pub mod state;
pub mod worldgen;
pub mod ws;
