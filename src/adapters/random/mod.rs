//! Randomness adapters.
//!
//! - `RngShuffler` - Uniform shuffles from `rand`
//! - `ScriptedShuffler` - Fixed permutations for tests and replays

mod rng_shuffler;
mod scripted;

pub use rng_shuffler::RngShuffler;
pub use scripted::ScriptedShuffler;
