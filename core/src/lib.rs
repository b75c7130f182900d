#![no_std]

extern crate alloc;

pub use board::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod game;
mod generator;
mod tile;
mod types;
