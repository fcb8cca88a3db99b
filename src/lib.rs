//! Say Anything - Party game sessions for chat channels
//!
//! One game per channel: players take turns setting a question, everyone
//! else privately guesses the setter's answer, the setter privately picks
//! the closest guess, and the channel votes anonymously on which answer was
//! picked.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
