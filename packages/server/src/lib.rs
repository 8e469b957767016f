//! Signaling relay library.
//!
//! Clients create or join a room and every frame a participant sends is
//! relayed to all other participants of that room. The relay never looks
//! inside the frames it forwards.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
