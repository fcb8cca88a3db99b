//! Domain layer containing game rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, events, state machine)
//! - `game` - The per-channel game aggregate and its round lifecycle

pub mod foundation;
pub mod game;
