//! MTG Stats - Commander game tracker
//!
//! This crate provides the HTTP API for recording Magic: The Gathering Commander
//! games and reporting per-player and per-deck win rates:
//! - Player, deck and color identity management
//! - Combined game session entry with up to four results
//! - Eligibility-aware statistics and dashboard aggregates

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod forms;
pub mod routes;
pub mod services;
pub mod state;
pub mod stats;
