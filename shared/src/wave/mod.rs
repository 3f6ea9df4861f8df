pub mod config;
mod entity;
mod footprint;
mod handler;
mod spray;

pub use config::*;
pub use entity::*;
pub use footprint::*;
pub use handler::*;
