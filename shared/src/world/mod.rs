pub mod biome;
pub mod blocks;
pub mod light;
pub mod map;
mod query;

pub use biome::*;
pub use blocks::*;
pub use light::*;
pub use map::*;
pub use query::*;
