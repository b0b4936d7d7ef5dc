//! Theme-state synchronization engine.
//!
//! Reconciles the user's light/dark/system preference with the OS color
//! scheme, persists the choice, applies the resolved theme to a render
//! target and mirrors it to a backend process.

pub mod shared;
pub mod sync;
pub mod theme;
