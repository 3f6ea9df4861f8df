//! Engine-agnostic core of the shoreline wave effect.
//!
//! Waves are short-lived cosmetic entities: they are spawned near shorelines,
//! ticked once per simulation step against a read-only [`world::WaveWorld`],
//! and turned into geometry by the client crate. Everything in here is
//! deterministic given a world, a config and a seeded RNG.

pub mod constants;
pub mod physics;
pub mod sprite;
pub mod utils;
pub mod wave;
pub mod world;

pub use constants::*;
