//! Client side of the shoreline wave effect: geometry generation and the Bevy
//! plugin that drives simulation and rebuilds geometry every frame.

pub mod plugin;
pub mod rendering;
pub mod shoreline;

pub use plugin::*;
