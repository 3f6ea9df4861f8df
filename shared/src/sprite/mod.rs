mod atlas;
mod frames;

pub use atlas::*;
pub use frames::*;
